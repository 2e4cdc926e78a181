/*
 * Responsibility
 * - Session token issuance/verification (HS256 JWT, multi-day TTL)
 * - Role claim is decoded into the closed Role enum here, at the boundary;
 *   any unknown value fails verification and the caller treats the request
 *   as unauthenticated
 */
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::services::access::{Identity, Role};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("invalid 'sub' (expected UUID)")]
    InvalidSubject,
    #[error("unrecognized role claim: {0}")]
    UnknownRole(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    role: String,
    name: String,
    iat: i64,
    exp: i64,
}

pub struct IssuedSession {
    pub token: String,
    pub expires_in: i64,
}

/// HS256 session signer/verifier.
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("SessionService")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionService {
    pub fn new(secret: &str, ttl_days: i64, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::days(ttl_days),
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<IssuedSession, SessionError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = SessionClaims {
            sub: identity.subject.to_string(),
            role: identity.role.as_str().to_string(),
            name: identity.display_name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(IssuedSession {
            token,
            expires_in: (expires_at - now).num_seconds(),
        })
    }

    pub fn verify(&self, token: &str) -> Result<Identity, SessionError> {
        let data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        let subject =
            Uuid::parse_str(&claims.sub).map_err(|_| SessionError::InvalidSubject)?;
        let role =
            Role::from_claim(&claims.role).ok_or(SessionError::UnknownRole(claims.role))?;

        Ok(Identity {
            subject,
            role,
            display_name: claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn service() -> SessionService {
        SessionService::new(SECRET, 5, 0)
    }

    fn identity() -> Identity {
        Identity {
            subject: Uuid::new_v4(),
            role: Role::Checker,
            display_name: "Anita".to_string(),
        }
    }

    #[test]
    fn issue_then_verify_round_trips_the_identity() {
        let svc = service();
        let id = identity();

        let issued = svc.issue(&id).unwrap();
        assert!(issued.expires_in > 4 * 24 * 3600);

        let verified = svc.verify(&issued.token).unwrap();
        assert_eq!(verified.subject, id.subject);
        assert_eq!(verified.role, Role::Checker);
        assert_eq!(verified.display_name, "Anita");
    }

    #[test]
    fn a_role_claim_outside_the_enumeration_is_rejected() {
        let svc = service();
        let claims = SessionClaims {
            sub: Uuid::new_v4().to_string(),
            role: "superuser".to_string(),
            name: "Eve".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::days(1)).timestamp(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            svc.verify(&token),
            Err(SessionError::UnknownRole(r)) if r == "superuser"
        ));
    }

    #[test]
    fn expired_and_tampered_tokens_are_rejected() {
        let svc = service();
        let id = identity();

        let claims = SessionClaims {
            sub: id.subject.to_string(),
            role: "checker".to_string(),
            name: id.display_name.clone(),
            iat: (Utc::now() - Duration::days(10)).timestamp(),
            exp: (Utc::now() - Duration::days(5)).timestamp(),
        };
        let expired = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(svc.verify(&expired).is_err());

        let issued = svc.issue(&id).unwrap();
        let mut tampered = issued.token;
        tampered.push('x');
        assert!(svc.verify(&tampered).is_err());
    }
}
