/*
 * Responsibility
 * - User administration request/response DTOs
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::user_repo::UserRow;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub user_name: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: String,
    pub status: String,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            user_name: row.user_name,
            display_name: row.display_name,
            email: row.email,
            role: row.role,
            status: row.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApproveUserRequest {
    /// Must be one of the recognized roles; checked in the handler.
    pub role: String,
}
