/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The perimeter middleware resolves the session, stores this in request
 *   extensions, and handlers only ever receive this type
 *
 * Notes
 * - Session verification lives in middleware/services; this is the fixed
 *   contract between them
 */

use crate::services::access::Identity;

/// Context attached to requests the perimeter gate allowed.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub identity: Identity,
}

impl AuthCtx {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}
