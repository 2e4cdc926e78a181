/*
 * Responsibility
 * - In-shell (authoritative) access check, run again inside the handler layer
 * - Re-evaluates the same gate function the perimeter middleware used, so the
 *   two layers cannot reach different verdicts for the same (role, path)
 */
use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::access::{self, GateVerdict, IdentityState};
use crate::state::AppState;

use super::AuthCtx;

/// Extractor handlers use to receive the authenticated context.
///
/// The perimeter middleware already gated the request, but that check is the
/// coarse one; this extractor repeats the decision against the live identity
/// in the request extensions before the handler runs.
pub struct Gated(pub AuthCtx);

impl FromRequestParts<AppState> for Gated
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<AuthCtx>() {
            Some(ctx) => IdentityState::Authenticated(ctx.identity.clone()),
            None => IdentityState::Anonymous,
        };

        // Nested routers strip their prefix from `parts.uri`; the policy
        // table speaks full paths, so prefer the original URI.
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        match access::evaluate(&identity, &path) {
            GateVerdict::Allow => match identity {
                IdentityState::Authenticated(id) => Ok(Gated(AuthCtx::new(id))),
                // Public-path handlers must not ask for a gated context.
                _ => Err(AppError::Unauthorized),
            },
            GateVerdict::RedirectLanding => Err(AppError::Forbidden),
            GateVerdict::Pending | GateVerdict::RedirectLogin => Err(AppError::Unauthorized),
        }
    }
}
