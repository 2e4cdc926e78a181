/*
 * Responsibility
 * - Closed Role enumeration and the static role -> route-prefix table
 * - Pure path predicates consulted by both enforcement points
 */

/// Roles recognized by the application.
///
/// The session token carries the role as an untyped string claim; it is
/// converted here, at the boundary, and any value outside this enumeration is
/// rejected (the caller treats the session as unauthenticated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Maker,
    Checker,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Maker, Role::Checker, Role::Admin];

    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim.trim().to_ascii_lowercase().as_str() {
            "maker" => Some(Role::Maker),
            "checker" => Some(Role::Checker),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Maker => "maker",
            Role::Checker => "checker",
            Role::Admin => "admin",
        }
    }
}

/// Paths reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[
    "/api/v1/health",
    "/api/v1/auth/login",
    "/api/v1/auth/register",
    "/api/v1/auth/validate",
];

/// Default authenticated landing route. Every role's allowed set must
/// include this path, otherwise the deny-redirect would loop.
pub const LANDING_PATH: &str = "/api/v1/dashboard";

/// Allowed path prefixes per role.
///
/// Matching is permissive: a prefix admits every path that starts with it
/// (`/api/v1/inward` admits `/api/v1/inward/123`). There is no deny list;
/// anything not covered here is denied for that role.
pub fn allowed_prefixes(role: Role) -> &'static [&'static str] {
    match role {
        Role::Maker => &[
            "/api/v1/dashboard",
            "/api/v1/auth/me",
            "/api/v1/auth/logout",
            "/api/v1/inward",
            "/api/v1/outward",
            "/api/v1/delivery-orders",
        ],
        Role::Checker => &[
            "/api/v1/dashboard",
            "/api/v1/auth/me",
            "/api/v1/auth/logout",
            "/api/v1/release-orders",
            "/api/v1/delivery-orders",
            "/api/v1/reports",
        ],
        Role::Admin => &[
            "/api/v1/dashboard",
            "/api/v1/auth/me",
            "/api/v1/auth/logout",
            "/api/v1/inward",
            "/api/v1/outward",
            "/api/v1/release-orders",
            "/api/v1/delivery-orders",
            "/api/v1/reports",
            "/api/v1/users",
        ],
    }
}

fn matches_prefix(prefixes: &[&str], path: &str) -> bool {
    prefixes
        .iter()
        .any(|p| !p.is_empty() && (path == *p || path.starts_with(p)))
}

/// Exact match or prefix match against the role's allowed set.
pub fn is_path_allowed(role: Role, path: &str) -> bool {
    matches_prefix(allowed_prefixes(role), path)
}

pub fn is_public_path(path: &str) -> bool {
    matches_prefix(PUBLIC_PATHS, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_claim_parsing_is_closed() {
        assert_eq!(Role::from_claim("maker"), Some(Role::Maker));
        assert_eq!(Role::from_claim(" Checker "), Some(Role::Checker));
        assert_eq!(Role::from_claim("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_claim("superuser"), None);
        assert_eq!(Role::from_claim(""), None);
    }

    #[test]
    fn every_role_reaches_the_landing_path() {
        for role in Role::ALL {
            assert!(
                is_path_allowed(role, LANDING_PATH),
                "{} cannot reach {}",
                role.as_str(),
                LANDING_PATH
            );
        }
    }

    #[test]
    fn prefix_match_admits_subpaths() {
        for role in Role::ALL {
            for prefix in allowed_prefixes(role) {
                let sub = format!("{prefix}/123");
                assert!(is_path_allowed(role, prefix));
                assert!(is_path_allowed(role, &sub), "{sub} denied for {}", role.as_str());
            }
        }
    }

    #[test]
    fn maker_cannot_reach_admin_routes() {
        assert!(!is_path_allowed(Role::Maker, "/api/v1/users"));
        assert!(!is_path_allowed(Role::Maker, "/api/v1/reports"));
        assert!(is_path_allowed(Role::Maker, "/api/v1/inward"));
    }

    #[test]
    fn checker_is_read_side_only() {
        assert!(!is_path_allowed(Role::Checker, "/api/v1/inward"));
        assert!(is_path_allowed(Role::Checker, "/api/v1/reports"));
        assert!(is_path_allowed(Role::Checker, "/api/v1/release-orders/42"));
    }

    #[test]
    fn public_paths_do_not_include_business_routes() {
        assert!(is_public_path("/api/v1/auth/login"));
        assert!(is_public_path("/api/v1/health"));
        assert!(!is_public_path("/api/v1/dashboard"));
        assert!(!is_public_path("/api/v1/inward"));
    }
}
