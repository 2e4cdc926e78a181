/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone is expected to be cheap (Arc / pooled handles inside)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::RoutePaths;
use crate::services::auth::{IdentityProvider, SessionService};
use crate::services::lockout::LoginAttemptLedger;
use crate::services::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub sessions: Arc<SessionService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub ledger: Arc<LoginAttemptLedger>,
    pub mailer: Arc<dyn Mailer>,
    pub paths: RoutePaths,
}

impl AppState {
    pub fn new(
        db: PgPool,
        sessions: Arc<SessionService>,
        identity: Arc<dyn IdentityProvider>,
        ledger: Arc<LoginAttemptLedger>,
        mailer: Arc<dyn Mailer>,
        paths: RoutePaths,
    ) -> Self {
        Self {
            db,
            sessions,
            identity,
            ledger,
            mailer,
            paths,
        }
    }
}
