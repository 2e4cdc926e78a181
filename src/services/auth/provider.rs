/*
 * Responsibility
 * - Identity-provider seam: credential verification returns a resolved
 *   Identity or nothing, never a partially-trusted value
 * - Postgres-backed implementation over the users table
 */
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::repos::user_repo;
use crate::services::access::{Identity, Role};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("identity backend error: {0}")]
    Backend(#[from] RepoError),
}

/// Credential verification boundary.
///
/// `Ok(None)` covers every expected rejection (unknown user, wrong password,
/// unapproved account, unrecognized role claim); `Err` is reserved for
/// backend failures, which callers must treat as a denied attempt.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, ProviderError>;
}

/// Salted SHA-256 digest, base64-encoded. Shared with registration so stored
/// and presented credentials are derived identically.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    BASE64.encode(hasher.finalize())
}

pub struct PgIdentityProvider {
    db: PgPool,
}

impl PgIdentityProvider {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, ProviderError> {
        let Some(row) = user_repo::find_credentials(&self.db, username).await? else {
            return Ok(None);
        };

        if row.status != "approved" {
            tracing::debug!(user = %row.user_name, status = %row.status, "login for unapproved account");
            return Ok(None);
        }

        if hash_password(&row.salt, password) != row.password_digest {
            return Ok(None);
        }

        // Stored role is an untyped string; convert it here and refuse
        // anything outside the enumeration.
        let Some(role) = Role::from_claim(&row.role) else {
            tracing::warn!(user = %row.user_name, role = %row.role, "unrecognized role on stored account");
            return Ok(None);
        };

        Ok(Some(Identity {
            subject: row.user_id,
            role,
            display_name: row.display_name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic_and_salt_sensitive() {
        let a = hash_password("salt-a", "Password123!");
        assert_eq!(a, hash_password("salt-a", "Password123!"));
        assert_ne!(a, hash_password("salt-b", "Password123!"));
        assert_ne!(a, hash_password("salt-a", "Password123?"));
    }
}
