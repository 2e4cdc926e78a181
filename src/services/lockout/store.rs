/*
 * Responsibility
 * - Storage seam for the login attempt ledger
 * - In-memory implementation for tests and single-node deployments
 */
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::services::cache::CacheError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("attempt store error: {0}")]
    Store(String),
}

impl From<CacheError> for LedgerError {
    fn from(e: CacheError) -> Self {
        LedgerError::Store(e.to_string())
    }
}

/// Point-in-time view of one ledger key, after lazy expiry has been applied.
/// `blocked_until`, when present, is always in the future relative to the
/// `now` the snapshot was taken with.
#[derive(Debug, Clone, Copy)]
pub struct AttemptSnapshot {
    pub failures: u32,
    pub blocked_until: Option<DateTime<Utc>>,
}

/// Storage operations for failed-login records.
///
/// Each method must be atomic per key: two concurrent `record_failure` calls
/// for the same key must both be retained. The in-memory implementation
/// serializes under one mutex; the Valkey implementation relies on single
/// atomic server commands.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Increment the consecutive failure count and return the post-increment
    /// value. A record whose block or counting window has lapsed is treated
    /// as fresh before incrementing (lockouts are not cumulative).
    async fn record_failure(
        &self,
        key: &str,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<u32, LedgerError>;

    /// Mark the key blocked until the given instant.
    async fn mark_blocked(&self, key: &str, until: DateTime<Utc>) -> Result<(), LedgerError>;

    /// Read-only lookup. Returns `None` for unknown keys and for records
    /// whose block/window has lapsed (lazy expiry; nothing is mutated).
    async fn snapshot(
        &self,
        key: &str,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<Option<AttemptSnapshot>, LedgerError>;

    /// Remove the record entirely.
    async fn clear(&self, key: &str) -> Result<(), LedgerError>;

    /// Remove every record whose key starts with `prefix`, returning how many
    /// were removed. Administrative override path.
    async fn clear_prefix(&self, prefix: &str) -> Result<u64, LedgerError>;

    /// Evict records whose block/window has lapsed. Returns the number of
    /// evicted records. Intended for opportunistic invocation, not per
    /// request.
    async fn sweep_expired(&self, now: DateTime<Utc>, window: Duration)
    -> Result<u64, LedgerError>;
}

#[derive(Debug, Clone)]
struct AttemptRecord {
    failures: u32,
    first_failure_at: DateTime<Utc>,
    blocked_until: Option<DateTime<Utc>>,
}

impl AttemptRecord {
    fn is_stale(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match self.blocked_until {
            // A lapsed block means the key starts over.
            Some(until) => until <= now,
            // No block: the counting window is anchored at the first failure.
            None => self.first_failure_at + window <= now,
        }
    }
}

/// Process-local attempt store.
#[derive(Debug, Default)]
pub struct MemoryAttemptStore {
    records: Mutex<HashMap<String, AttemptRecord>>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptStore for MemoryAttemptStore {
    async fn record_failure(
        &self,
        key: &str,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<u32, LedgerError> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;

        let fresh = AttemptRecord {
            failures: 0,
            first_failure_at: now,
            blocked_until: None,
        };
        let record = records
            .entry(key.to_string())
            .and_modify(|r| {
                if r.is_stale(now, window) {
                    *r = fresh.clone();
                }
            })
            .or_insert(fresh);

        record.failures += 1;
        Ok(record.failures)
    }

    async fn mark_blocked(&self, key: &str, until: DateTime<Utc>) -> Result<(), LedgerError> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;

        records
            .entry(key.to_string())
            .and_modify(|r| r.blocked_until = Some(until))
            .or_insert(AttemptRecord {
                failures: 0,
                first_failure_at: until,
                blocked_until: Some(until),
            });
        Ok(())
    }

    async fn snapshot(
        &self,
        key: &str,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<Option<AttemptSnapshot>, LedgerError> {
        let records = self.records.lock().map_err(|_| poisoned())?;

        let snapshot = records.get(key).and_then(|r| {
            if r.is_stale(now, window) {
                None
            } else {
                Some(AttemptSnapshot {
                    failures: r.failures,
                    blocked_until: r.blocked_until,
                })
            }
        });
        Ok(snapshot)
    }

    async fn clear(&self, key: &str) -> Result<(), LedgerError> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        records.remove(key);
        Ok(())
    }

    async fn clear_prefix(&self, prefix: &str) -> Result<u64, LedgerError> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;

        let before = records.len();
        records.retain(|key, _| !key.starts_with(prefix));
        Ok((before - records.len()) as u64)
    }

    async fn sweep_expired(
        &self,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<u64, LedgerError> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;

        let before = records.len();
        records.retain(|_, r| !r.is_stale(now, window));
        Ok((before - records.len()) as u64)
    }
}

fn poisoned() -> LedgerError {
    LedgerError::Store("attempt store mutex poisoned".to_string())
}
