/*
 * Responsibility
 * - The single allow/deny/redirect decision procedure for a navigation
 * - Shared by the perimeter middleware and the in-handler extractor so both
 *   enforcement points cannot diverge
 */
use uuid::Uuid;

use crate::services::access::policy::{self, Role};

/// Session-scoped, read-only copy of what the identity provider resolved.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: Uuid,
    pub role: Role,
    pub display_name: String,
}

/// Identity resolution state at the time the gate runs.
///
/// `Unresolved` only occurs in clients that load identity asynchronously; the
/// server-side middleware always resolves to `Anonymous` or `Authenticated`
/// before evaluating. Provider failures map to `Anonymous` (fail closed).
#[derive(Debug, Clone)]
pub enum IdentityState {
    Unresolved,
    Anonymous,
    Authenticated(Identity),
}

/// Terminal verdict for one navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    /// Identity not resolved yet; render/forward nothing.
    Pending,
    Allow,
    RedirectLogin,
    RedirectLanding,
}

/// Decide what happens to a request for `path` under `identity`.
///
/// Pure function of the static policy table and its inputs; every enforcement
/// point must call this rather than re-reading the table.
pub fn evaluate(identity: &IdentityState, path: &str) -> GateVerdict {
    match identity {
        IdentityState::Unresolved => GateVerdict::Pending,
        IdentityState::Anonymous => {
            if policy::is_public_path(path) {
                GateVerdict::Allow
            } else {
                GateVerdict::RedirectLogin
            }
        }
        IdentityState::Authenticated(id) => {
            if policy::is_public_path(path) || policy::is_path_allowed(id.role, path) {
                GateVerdict::Allow
            } else {
                GateVerdict::RedirectLanding
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> IdentityState {
        IdentityState::Authenticated(Identity {
            subject: Uuid::new_v4(),
            role,
            display_name: "Test".to_string(),
        })
    }

    #[test]
    fn unresolved_identity_suspends() {
        assert_eq!(
            evaluate(&IdentityState::Unresolved, "/api/v1/dashboard"),
            GateVerdict::Pending
        );
    }

    #[test]
    fn anonymous_is_sent_to_login_except_on_public_paths() {
        assert_eq!(
            evaluate(&IdentityState::Anonymous, "/api/v1/auth/login"),
            GateVerdict::Allow
        );
        assert_eq!(
            evaluate(&IdentityState::Anonymous, "/api/v1/dashboard"),
            GateVerdict::RedirectLogin
        );
        assert_eq!(
            evaluate(&IdentityState::Anonymous, "/api/v1/inward/7"),
            GateVerdict::RedirectLogin
        );
    }

    #[test]
    fn authenticated_allowed_and_denied_paths() {
        assert_eq!(
            evaluate(&identity(Role::Maker), "/api/v1/inward/7"),
            GateVerdict::Allow
        );
        assert_eq!(
            evaluate(&identity(Role::Maker), "/api/v1/users"),
            GateVerdict::RedirectLanding
        );
        assert_eq!(
            evaluate(&identity(Role::Admin), "/api/v1/users"),
            GateVerdict::Allow
        );
    }

    #[test]
    fn authenticated_users_keep_access_to_public_paths() {
        assert_eq!(
            evaluate(&identity(Role::Checker), "/api/v1/health"),
            GateVerdict::Allow
        );
    }

    #[test]
    fn landing_redirect_target_is_reachable_for_all_roles() {
        // A deny must never redirect to another denied path.
        for role in Role::ALL {
            assert_eq!(
                evaluate(&identity(role), policy::LANDING_PATH),
                GateVerdict::Allow
            );
        }
    }
}
