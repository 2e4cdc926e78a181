/*
 * Responsibility
 * - /auth handlers: login (throttled), register (validated), session echo
 * - The attempt ledger is consulted before credential verification and
 *   updated after its outcome
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;
use uuid::Uuid;

use crate::api::v1::dto::auth::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse, ValidateRequest,
    ValidateResponse,
};
use crate::api::v1::extractors::Gated;
use crate::error::AppError;
use crate::repos::user_repo;
use crate::services::auth::hash_password;
use crate::services::mailer::OutboundEmail;
use crate::services::validation::{format_username, validate_password, validate_username};
use crate::state::AppState;

// First hop of X-Forwarded-For, when a proxy supplies one. Used only to
// qualify the throttling key, never for authorization.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request(
            "MISSING_CREDENTIALS",
            "username and password are required",
        ));
    }

    let ip = client_ip(&headers);
    let ip = ip.as_deref();

    // Throttle check comes before credential verification so a locked key
    // never reaches the identity provider.
    let throttle = state.ledger.check(username, ip).await?;
    if throttle.blocked {
        // Ledger invariant: blocked outcomes carry the expiry.
        let blocked_until = throttle.blocked_until.unwrap_or_else(Utc::now);
        return Err(AppError::Locked { blocked_until });
    }

    match state.identity.verify_credentials(username, &req.password).await {
        Ok(Some(identity)) => {
            if let Err(e) = state.ledger.record_success(username, ip).await {
                // Losing the reset is survivable; the user is in.
                tracing::warn!(error = %e, "failed to clear attempt ledger after login");
            }

            let issued = state.sessions.issue(&identity).map_err(|e| {
                tracing::error!(error = %e, "session issuance failed");
                AppError::Internal
            })?;

            tracing::info!(user = %username, role = identity.role.as_str(), "login succeeded");
            Ok(Json(LoginResponse {
                access_token: issued.token,
                token_type: "Bearer".to_string(),
                expires_in: issued.expires_in,
                role: identity.role.as_str(),
                display_name: identity.display_name,
            }))
        }
        Ok(None) => {
            let outcome = state.ledger.record_failure(username, ip).await?;
            tracing::info!(
                user = %username,
                attempts_remaining = outcome.attempts_remaining,
                "login failed"
            );

            if outcome.blocked {
                let blocked_until = outcome.blocked_until.unwrap_or_else(Utc::now);
                return Err(AppError::Locked { blocked_until });
            }
            Err(AppError::InvalidCredentials {
                attempts_remaining: outcome.attempts_remaining,
            })
        }
        Err(e) => {
            // Provider failure is not a failed attempt; deny without
            // touching the ledger.
            tracing::error!(error = %e, "identity provider failure during login");
            Err(AppError::ServiceUnavailable)
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_REGISTRATION", m))?;

    let username = req.username.trim();
    let checked = validate_username(username);
    if !checked.is_valid {
        let message = checked
            .message
            .unwrap_or_else(|| "invalid username".to_string());
        return Err(AppError::bad_request("INVALID_USERNAME", message));
    }

    let checked = validate_password(&req.password);
    if !checked.is_valid {
        let message = checked
            .message
            .unwrap_or_else(|| "invalid password".to_string());
        return Err(AppError::bad_request("INVALID_PASSWORD", message));
    }

    if user_repo::find_by_username(&state.db, username).await?.is_some() {
        return Err(AppError::conflict(
            "USERNAME_TAKEN",
            "username is already registered",
        ));
    }

    let salt = Uuid::new_v4().simple().to_string();
    let digest = hash_password(&salt, &req.password);
    let row = user_repo::create_pending(
        &state.db,
        username,
        req.display_name.trim(),
        req.email.as_deref(),
        &digest,
        &salt,
    )
    .await?;

    if let Some(email) = &row.email {
        let mail = OutboundEmail {
            to: email.clone(),
            subject: "Warehouse account registration received".to_string(),
            text: format!(
                "Hello {}, your account is awaiting administrator approval.",
                row.display_name
            ),
            html: None,
        };
        if let Err(e) = state.mailer.send(mail).await {
            tracing::warn!(error = %e, "registration notification failed");
        }
    }

    tracing::info!(user = %row.user_name, "registration accepted (pending approval)");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: row.user_id,
            user_name: row.user_name,
            status: row.status,
        }),
    ))
}

/// Form-assist endpoint: per-rule results and the username normalization
/// suggestion. Pure computation; safe to call per keystroke.
pub async fn validate(Json(req): Json<ValidateRequest>) -> Json<ValidateResponse> {
    let (username, username_suggestion) = match req.username.as_deref() {
        Some(u) => (
            Some(validate_username(u.trim())),
            Some(format_username(u)),
        ),
        None => (None, None),
    };
    let password = req.password.as_deref().map(validate_password);

    Json(ValidateResponse {
        username,
        username_suggestion,
        password,
    })
}

pub async fn me(Gated(ctx): Gated) -> Json<MeResponse> {
    Json(MeResponse {
        subject: ctx.identity.subject,
        role: ctx.identity.role.as_str(),
        display_name: ctx.identity.display_name,
    })
}

/// Sessions are stateless JWTs; logout is an acknowledgement and the client
/// discards the token.
pub async fn logout(Gated(ctx): Gated) -> StatusCode {
    tracing::info!(subject = %ctx.identity.subject, "logout");
    StatusCode::NO_CONTENT
}
