pub mod access;
pub mod auth;
pub mod cache;
pub mod lockout;
pub mod mailer;
pub mod validation;
