pub mod factory;
pub mod provider;
pub mod session;

pub use factory::{build_ledger, build_session_service};
pub use provider::{IdentityProvider, PgIdentityProvider, ProviderError, hash_password};
pub use session::{SessionError, SessionService};
