//! Cache client interface used by higher-level services (login throttling, etc.).
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-layer errors (transport/command/serialization).
///
/// Kept independent from `AppError` so callers can decide how to fail
/// (fail-closed for the attempt ledger, fail-open for best-effort features).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
    #[error("cache value error: {0}")]
    InvalidValue(String),
}

/// A minimal cache interface.
///
/// Intentionally small and string/counter-based: the attempt ledger only
/// needs an atomic increment plus GET/SET/DEL with TTLs. New methods are
/// added when a feature actually needs them.
///
/// Implementations must be cheap to clone (typically `Arc<...>` inside).
#[async_trait]
pub trait CacheClient: Clone + Send + Sync + 'static {
    // Returns the cache backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Get UTF-8 string value.
    async fn get_string(&self, key: &str) -> CacheResult<Option<String>>;

    // Set value unconditionally, with TTL.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    // Atomically increment an integer key and return the post-increment
    // value. The TTL is attached when the increment creates the key, so a
    // counter expires `ttl` after its first increment.
    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> CacheResult<u64>;

    // Delete keys. Returns number of deleted keys.
    async fn del(&self, keys: &[&str]) -> CacheResult<u64>;

    // List keys matching a glob pattern. Administrative use only (unlock,
    // maintenance), never on the request hot path.
    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>>;
}
