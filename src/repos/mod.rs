pub mod error;
pub mod order_repo;
pub mod user_repo;
