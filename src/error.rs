/*
 * Responsibility
 * - App-wide AppError definition
 * - IntoResponse impl (HTTP status / JSON error body)
 * - Uniform conversion from repo / ledger / session errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::lockout::LedgerError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("{code}: {message}")]
    Conflict { code: &'static str, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid credentials ({attempts_remaining} attempts remaining)")]
    InvalidCredentials { attempts_remaining: u32 },
    #[error("forbidden")]
    Forbidden,
    #[error("account locked until {blocked_until}")]
    Locked { blocked_until: DateTime<Utc> },
    #[error("service unavailable")]
    ServiceUnavailable,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{resource} not found."),
            ),
            AppError::Conflict { code, message } => (StatusCode::CONFLICT, code, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".into(),
            ),
            AppError::InvalidCredentials { attempts_remaining } => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                format!("invalid credentials ({attempts_remaining} attempts remaining)"),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".into()),
            AppError::Locked { blocked_until } => (
                StatusCode::TOO_MANY_REQUESTS,
                "ACCOUNT_LOCKED",
                format!("too many failed attempts; locked until {}", blocked_until.to_rfc3339()),
            ),
            AppError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "service unavailable".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        // Attempt-store failures must not fail open; surface them so the
        // caller denies the attempt instead of skipping the throttle.
        tracing::warn!(error = %e, "attempt ledger backend failure");
        AppError::ServiceUnavailable
    }
}
