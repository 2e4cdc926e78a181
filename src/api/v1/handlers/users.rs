/*
 * Responsibility
 * - Admin-only user administration: listing, approval, lockout override
 * - Reaching these handlers at all requires the admin role; the gate enforces
 *   that at both layers before any of this code runs
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::v1::dto::users::{ApproveUserRequest, UserResponse};
use crate::api::v1::extractors::Gated;
use crate::error::AppError;
use crate::repos::user_repo;
use crate::services::access::Role;
use crate::services::mailer::OutboundEmail;
use crate::state::AppState;

pub async fn list_users(
    Gated(_): Gated,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = user_repo::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

pub async fn approve_user(
    Gated(ctx): Gated,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ApproveUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let role = Role::from_claim(&req.role)
        .ok_or_else(|| AppError::bad_request("UNKNOWN_ROLE", "unrecognized role"))?;

    let row = user_repo::approve(&state.db, user_id, role.as_str())
        .await?
        .ok_or(AppError::not_found("user"))?;

    // An account stuck behind a lockout from pre-approval attempts would be
    // a confusing first experience; reset it as part of approval.
    if let Err(e) = state.ledger.clear_all(&row.user_name).await {
        tracing::warn!(error = %e, user = %row.user_name, "attempt reset failed during approval");
    }

    if let Some(email) = &row.email {
        let mail = OutboundEmail {
            to: email.clone(),
            subject: "Warehouse account approved".to_string(),
            text: format!(
                "Hello {}, your account has been approved with the {} role.",
                row.display_name, row.role
            ),
            html: None,
        };
        if let Err(e) = state.mailer.send(mail).await {
            tracing::warn!(error = %e, "approval notification failed");
        }
    }

    tracing::info!(
        admin = %ctx.identity.subject,
        user = %row.user_name,
        role = %row.role,
        "user approved"
    );
    Ok(Json(UserResponse::from(row)))
}

/// Lift a login lockout ahead of its natural expiry.
pub async fn unlock_user(
    Gated(ctx): Gated,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let row = user_repo::get(&state.db, user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    let cleared = state.ledger.clear_all(&row.user_name).await?;
    tracing::debug!(cleared, user = %row.user_name, "attempt records cleared");

    // Cheap moment to drop lapsed records for everyone else too.
    match state.ledger.sweep_expired().await {
        Ok(evicted) if evicted > 0 => {
            tracing::debug!(evicted, "swept lapsed attempt records");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "attempt sweep failed"),
    }

    tracing::info!(admin = %ctx.identity.subject, user = %row.user_name, "lockout lifted");
    Ok(StatusCode::NO_CONTENT)
}
