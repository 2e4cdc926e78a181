pub mod password;
pub mod rules;
pub mod username;

pub use password::validate_password;
pub use rules::{Strength, Validation};
pub use username::{format_username, validate_username};
