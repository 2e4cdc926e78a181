/*
 * Responsibility
 * - Login-attempt throttling decisions on top of an injected AttemptStore
 * - Keying, threshold/lockout arithmetic, lazy expiry semantics
 */
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::LockoutPolicy;
use crate::services::lockout::store::{AttemptStore, LedgerError};

/// What a ledger operation reports back to the login flow.
#[derive(Debug, Clone, Copy)]
pub struct AttemptOutcome {
    pub blocked: bool,
    pub attempts_remaining: u32,
    pub blocked_until: Option<DateTime<Utc>>,
}

/// Service object over the attempt store. All callers share one instance
/// through `AppState`; there is deliberately no module-level singleton so
/// tests can run against isolated stores.
pub struct LoginAttemptLedger {
    store: Arc<dyn AttemptStore>,
    policy: LockoutPolicy,
}

impl LoginAttemptLedger {
    pub fn new(store: Arc<dyn AttemptStore>, policy: LockoutPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    // Throttling is keyed on the normalized username, optionally qualified by
    // the client address when the caller can supply one.
    fn key(username: &str, ip: Option<&str>) -> String {
        format!(
            "{}|{}",
            username.trim().to_lowercase(),
            ip.unwrap_or("-").trim()
        )
    }

    pub async fn record_failure(
        &self,
        username: &str,
        ip: Option<&str>,
    ) -> Result<AttemptOutcome, LedgerError> {
        self.record_failure_at(username, ip, Utc::now()).await
    }

    /// Same as [`record_failure`](Self::record_failure) with an explicit
    /// clock reading, so the expiry arithmetic stays testable.
    pub async fn record_failure_at(
        &self,
        username: &str,
        ip: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, LedgerError> {
        let key = Self::key(username, ip);
        let failures = self
            .store
            .record_failure(&key, now, self.policy.window)
            .await?;

        if failures >= self.policy.threshold {
            let until = now + self.policy.lockout;
            self.store.mark_blocked(&key, until).await?;
            return Ok(AttemptOutcome {
                blocked: true,
                attempts_remaining: 0,
                blocked_until: Some(until),
            });
        }

        Ok(AttemptOutcome {
            blocked: false,
            attempts_remaining: self.policy.threshold - failures,
            blocked_until: None,
        })
    }

    /// A success always resets the key, blocked or not.
    pub async fn record_success(
        &self,
        username: &str,
        ip: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.store.clear(&Self::key(username, ip)).await
    }

    pub async fn check(&self, username: &str, ip: Option<&str>) -> Result<AttemptOutcome, LedgerError> {
        self.check_at(username, ip, Utc::now()).await
    }

    /// Pure lookup; never mutates. A lapsed block reads as a fresh key with
    /// the full attempt budget.
    pub async fn check_at(
        &self,
        username: &str,
        ip: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, LedgerError> {
        let key = Self::key(username, ip);
        let snapshot = self.store.snapshot(&key, now, self.policy.window).await?;

        let outcome = match snapshot {
            None => AttemptOutcome {
                blocked: false,
                attempts_remaining: self.policy.threshold,
                blocked_until: None,
            },
            Some(s) => match s.blocked_until {
                Some(until) => AttemptOutcome {
                    blocked: true,
                    attempts_remaining: 0,
                    blocked_until: Some(until),
                },
                None => AttemptOutcome {
                    blocked: false,
                    attempts_remaining: self.policy.threshold.saturating_sub(s.failures),
                    blocked_until: None,
                },
            },
        };
        Ok(outcome)
    }

    /// Administrative override: forget the key entirely.
    pub async fn clear(&self, username: &str, ip: Option<&str>) -> Result<(), LedgerError> {
        self.store.clear(&Self::key(username, ip)).await
    }

    /// Administrative unlock: forget every record for a username, whatever
    /// client address qualified it.
    pub async fn clear_all(&self, username: &str) -> Result<u64, LedgerError> {
        let prefix = format!("{}|", username.trim().to_lowercase());
        self.store.clear_prefix(&prefix).await
    }

    /// Evict lapsed records. Invoked opportunistically (admin unlock, startup),
    /// never on the request path.
    pub async fn sweep_expired(&self) -> Result<u64, LedgerError> {
        self.store
            .sweep_expired(Utc::now(), self.policy.window)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lockout::store::MemoryAttemptStore;
    use chrono::Duration;

    fn ledger() -> LoginAttemptLedger {
        LoginAttemptLedger::new(
            Arc::new(MemoryAttemptStore::new()),
            LockoutPolicy {
                threshold: 5,
                lockout: Duration::minutes(15),
                window: Duration::minutes(15),
            },
        )
    }

    #[tokio::test]
    async fn blocks_on_the_threshold_attempt_and_not_before() {
        let ledger = ledger();

        for n in 1..5u32 {
            let out = ledger.record_failure("alice", None).await.unwrap();
            assert!(!out.blocked, "attempt {n} should not block");
            assert_eq!(out.attempts_remaining, 5 - n);
        }

        let out = ledger.record_failure("alice", None).await.unwrap();
        assert!(out.blocked);
        assert_eq!(out.attempts_remaining, 0);
        assert!(out.blocked_until.is_some());
    }

    #[tokio::test]
    async fn blocked_until_is_exactly_lockout_after_the_blocking_call() {
        let ledger = ledger();
        let t0 = Utc::now();

        for i in 0..4 {
            ledger
                .record_failure_at("alice", None, t0 + Duration::seconds(i))
                .await
                .unwrap();
        }
        let t5 = t0 + Duration::seconds(10);
        let out = ledger.record_failure_at("alice", None, t5).await.unwrap();

        assert!(out.blocked);
        assert_eq!(out.blocked_until, Some(t5 + Duration::minutes(15)));
    }

    #[tokio::test]
    async fn check_reports_blocked_while_the_window_holds() {
        let ledger = ledger();
        let t0 = Utc::now();

        for _ in 0..5 {
            ledger.record_failure_at("alice", None, t0).await.unwrap();
        }

        let during = ledger
            .check_at("alice", None, t0 + Duration::minutes(5))
            .await
            .unwrap();
        assert!(during.blocked);
        assert_eq!(during.attempts_remaining, 0);
    }

    #[tokio::test]
    async fn lapsed_block_reads_fresh_and_resets_the_count() {
        let ledger = ledger();
        let t0 = Utc::now();

        for _ in 0..5 {
            ledger.record_failure_at("alice", None, t0).await.unwrap();
        }

        // One second past the lockout expiry: full budget again.
        let after = t0 + Duration::minutes(15) + Duration::seconds(1);
        let out = ledger.check_at("alice", None, after).await.unwrap();
        assert!(!out.blocked);
        assert_eq!(out.attempts_remaining, 5);

        // The next failure starts a fresh streak rather than blocking again.
        let out = ledger.record_failure_at("alice", None, after).await.unwrap();
        assert!(!out.blocked);
        assert_eq!(out.attempts_remaining, 4);
    }

    #[tokio::test]
    async fn success_clears_any_partial_streak() {
        let ledger = ledger();

        for n in 0..4 {
            for _ in 0..n {
                ledger.record_failure("bob", None).await.unwrap();
            }
            ledger.record_success("bob", None).await.unwrap();

            let out = ledger.check("bob", None).await.unwrap();
            assert!(!out.blocked);
            assert_eq!(out.attempts_remaining, 5, "streak of {n} not cleared");
        }
    }

    #[tokio::test]
    async fn keys_are_case_insensitive_and_ip_qualified() {
        let ledger = ledger();

        ledger.record_failure("Alice", None).await.unwrap();
        let out = ledger.check("alice", None).await.unwrap();
        assert_eq!(out.attempts_remaining, 4);

        // Different IP, different key.
        let out = ledger.check("alice", Some("10.0.0.9")).await.unwrap();
        assert_eq!(out.attempts_remaining, 5);
    }

    #[tokio::test]
    async fn concurrent_failures_for_one_key_are_both_retained() {
        // The classic read-increment-write race: both increments must land.
        let ledger = Arc::new(ledger());

        let a = {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move { ledger.record_failure("alice", None).await })
        };
        let b = {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move { ledger.record_failure("alice", None).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let out = ledger.check("alice", None).await.unwrap();
        assert_eq!(out.attempts_remaining, 3);
    }

    #[tokio::test]
    async fn clear_all_reaches_every_address_qualified_key() {
        let ledger = ledger();

        for _ in 0..5 {
            ledger
                .record_failure("alice", Some("10.0.0.9"))
                .await
                .unwrap();
        }
        ledger.record_failure("alice", None).await.unwrap();
        ledger.record_failure("bob", None).await.unwrap();

        let cleared = ledger.clear_all("Alice").await.unwrap();
        assert_eq!(cleared, 2);

        let out = ledger.check("alice", Some("10.0.0.9")).await.unwrap();
        assert!(!out.blocked);
        assert_eq!(out.attempts_remaining, 5);

        // Other usernames untouched.
        let out = ledger.check("bob", None).await.unwrap();
        assert_eq!(out.attempts_remaining, 4);
    }

    #[tokio::test]
    async fn sweep_evicts_only_lapsed_records() {
        let ledger = ledger();
        let t0 = Utc::now() - Duration::hours(1);

        ledger.record_failure_at("old", None, t0).await.unwrap();
        ledger.record_failure("recent", None).await.unwrap();

        let evicted = ledger.sweep_expired().await.unwrap();
        assert_eq!(evicted, 1);

        let out = ledger.check("recent", None).await.unwrap();
        assert_eq!(out.attempts_remaining, 4);
    }
}
