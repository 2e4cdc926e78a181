/// Factory: build auth-related services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::session::SessionService;
use crate::services::cache::{CacheError, ValkeyClient};
use crate::services::lockout::{
    AttemptStore, LoginAttemptLedger, MemoryAttemptStore, ValkeyAttemptStore,
};

pub fn build_session_service(config: &Config) -> Arc<SessionService> {
    Arc::new(SessionService::new(
        &config.session_secret,
        config.session_ttl_days,
        config.session_leeway_seconds,
    ))
}

/// The attempt store is shared (Valkey) when a URL is configured, otherwise
/// process-local. Single-node deployments lose nothing with the in-memory
/// store; multi-node ones must configure the shared one or each node counts
/// failures separately.
pub async fn build_ledger(config: &Config) -> Result<Arc<LoginAttemptLedger>, CacheError> {
    let store: Arc<dyn AttemptStore> = match &config.attempt_store_url {
        Some(url) => {
            let client = ValkeyClient::new(url).await?;
            tracing::info!("attempt ledger backed by valkey");
            Arc::new(ValkeyAttemptStore::new(client))
        }
        None => {
            tracing::info!("attempt ledger backed by process-local memory");
            Arc::new(MemoryAttemptStore::new())
        }
    };

    Ok(Arc::new(LoginAttemptLedger::new(store, config.lockout)))
}
