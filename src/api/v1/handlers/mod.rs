pub mod auth;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod reports;
pub mod users;
