pub mod gate;
pub mod policy;

pub use gate::{GateVerdict, Identity, IdentityState, evaluate};
pub use policy::Role;
