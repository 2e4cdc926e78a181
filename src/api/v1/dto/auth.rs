/*
 * Responsibility
 * - Auth request/response DTOs (login, register, validation preview)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::validation::Validation;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role: &'static str,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub email: Option<String>,
}

impl RegisterRequest {
    // Shape checks only; the username/password rule sets run in the handler.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.display_name.trim().is_empty() {
            return Err("display_name is required");
        }
        if let Some(email) = &self.email
            && !email.contains('@')
        {
            return Err("email must contain '@'");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub user_name: String,
    pub status: String,
}

/// Both fields optional so the client can check a single form field per
/// keystroke without sending the other.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub username: Option<Validation>,
    /// Normalization suggestion for the username field; never auto-applied.
    pub username_suggestion: Option<String>,
    pub password: Option<Validation>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject: Uuid,
    pub role: &'static str,
    pub display_name: String,
}
