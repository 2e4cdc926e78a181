use async_trait::async_trait;
use std::time::Duration;

use crate::services::cache::client::{CacheClient, CacheError, CacheResult};

/// Valkey/Redis-backed cache client.
///
/// Only the commands the attempt ledger needs are implemented
/// (GET / SET EX / INCR+EXPIRE / DEL).
#[derive(Clone, Debug)]
pub struct ValkeyClient {
    manager: redis::aio::ConnectionManager,
}

impl ValkeyClient {
    // Create a Valkey client from a URL like `redis://localhost:6379`
    pub async fn new(url: &str) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::BackendConnection(e.to_string()))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::BackendConnection(e.to_string()))?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheClient for ValkeyClient {
    fn backend_name(&self) -> &'static str {
        "valkey"
    }

    async fn get_string(&self, key: &str) -> CacheResult<Option<String>> {
        // Connection manager clones share the underlying multiplexed connection.
        let mut conn = self.manager.clone();

        let resp: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::BackendCommand(e.to_string()))?;

        Ok(resp)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.manager.clone();

        // EX expects integer seconds; clamp to at least 1 sec.
        let ttl_seconds: u64 = ttl.as_secs().max(1);

        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::BackendCommand(e.to_string()))?;

        Ok(())
    }

    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> CacheResult<u64> {
        let mut conn = self.manager.clone();
        let ttl_seconds: u64 = ttl.as_secs().max(1);

        // INCR is atomic server-side, which is what keeps concurrent
        // failures for the same key from losing updates. The EXPIRE that
        // follows the first increment is a second command; the worst case of
        // losing it is a counter that never expires, not a lost increment.
        let n: u64 = redis::cmd("INCR")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::BackendCommand(e.to_string()))?;

        if n == 1 {
            redis::cmd("EXPIRE")
                .arg(key)
                .arg(ttl_seconds)
                .query_async::<()>(&mut conn)
                .await
                .map_err(|e| CacheError::BackendCommand(e.to_string()))?;
        }

        Ok(n)
    }

    async fn del(&self, keys: &[&str]) -> CacheResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.manager.clone();

        // DEL returns the number of keys removed.
        let mut cmd = redis::cmd("DEL");
        for key in keys {
            cmd.arg(*key);
        }
        let n: u64 = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::BackendCommand(e.to_string()))?;

        Ok(n)
    }

    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.manager.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        // Cursor-based SCAN instead of KEYS, which blocks the server.
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(|e| CacheError::BackendCommand(e.to_string()))?;

            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        Ok(keys)
    }
}
