/*
 * Responsibility
 * - Valkey/Redis-backed AttemptStore for deployments that share the ledger
 *   across instances
 */
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::services::cache::CacheClient;
use crate::services::lockout::store::{AttemptSnapshot, AttemptStore, LedgerError};

/// Attempt store on the shared cache.
///
/// Layout per ledger key K (under `prefix`):
/// - `<prefix>:attempts:K` — integer failure counter, TTL = counting window
/// - `<prefix>:block:K`    — RFC 3339 lockout expiry, TTL = lockout duration
///
/// Atomicity per key comes from single server-side commands (INCR, SET EX);
/// expiry is enforced by TTLs, so `sweep_expired` has nothing to do here.
#[derive(Clone)]
pub struct ValkeyAttemptStore<C: CacheClient> {
    cache: C,
    prefix: String,
}

impl<C: CacheClient> ValkeyAttemptStore<C> {
    pub fn new(cache: C) -> Self {
        Self::with_prefix(cache, "login")
    }

    // Prefix keeps environments sharing one Valkey from colliding.
    pub fn with_prefix(cache: C, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    fn attempts_key(&self, key: &str) -> String {
        format!("{}:attempts:{}", self.prefix, key)
    }

    fn block_key(&self, key: &str) -> String {
        format!("{}:block:{}", self.prefix, key)
    }

    async fn read_block(
        &self,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, LedgerError> {
        let raw = self.cache.get_string(&self.block_key(key)).await?;
        let Some(raw) = raw else { return Ok(None) };

        match DateTime::parse_from_rfc3339(&raw) {
            Ok(until) => {
                let until = until.with_timezone(&Utc);
                // TTL should have evicted lapsed blocks already; treat a
                // straggler as absent rather than extending the lockout.
                Ok((until > now).then_some(until))
            }
            Err(e) => {
                tracing::warn!(error = %e, "unparseable lockout expiry in attempt store");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<C: CacheClient> AttemptStore for ValkeyAttemptStore<C> {
    async fn record_failure(
        &self,
        key: &str,
        _now: DateTime<Utc>,
        window: Duration,
    ) -> Result<u32, LedgerError> {
        let ttl = std::time::Duration::from_secs(window.num_seconds().max(1) as u64);
        let n = self.cache.incr_with_ttl(&self.attempts_key(key), ttl).await?;
        Ok(u32::try_from(n).unwrap_or(u32::MAX))
    }

    async fn mark_blocked(&self, key: &str, until: DateTime<Utc>) -> Result<(), LedgerError> {
        let ttl_secs = (until - Utc::now()).num_seconds().max(1) as u64;
        self.cache
            .set_with_ttl(
                &self.block_key(key),
                &until.to_rfc3339(),
                std::time::Duration::from_secs(ttl_secs),
            )
            .await?;

        // Drop the counter so the key reads fresh once the block lapses.
        self.cache.del(&[&self.attempts_key(key)]).await?;
        Ok(())
    }

    async fn snapshot(
        &self,
        key: &str,
        now: DateTime<Utc>,
        _window: Duration,
    ) -> Result<Option<AttemptSnapshot>, LedgerError> {
        if let Some(until) = self.read_block(key, now).await? {
            return Ok(Some(AttemptSnapshot {
                failures: 0,
                blocked_until: Some(until),
            }));
        }

        let failures = self
            .cache
            .get_string(&self.attempts_key(key))
            .await?
            .and_then(|s| s.parse::<u32>().ok());

        Ok(failures.map(|failures| AttemptSnapshot {
            failures,
            blocked_until: None,
        }))
    }

    async fn clear(&self, key: &str) -> Result<(), LedgerError> {
        self.cache
            .del(&[&self.attempts_key(key), &self.block_key(key)])
            .await?;
        Ok(())
    }

    async fn clear_prefix(&self, prefix: &str) -> Result<u64, LedgerError> {
        let mut keys = self
            .cache
            .scan_keys(&format!("{}*", self.attempts_key(prefix)))
            .await?;
        keys.extend(
            self.cache
                .scan_keys(&format!("{}*", self.block_key(prefix)))
                .await?,
        );
        if keys.is_empty() {
            return Ok(0);
        }

        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        Ok(self.cache.del(&refs).await?)
    }

    async fn sweep_expired(
        &self,
        _now: DateTime<Utc>,
        _window: Duration,
    ) -> Result<u64, LedgerError> {
        // TTLs evict server-side.
        Ok(0)
    }
}
