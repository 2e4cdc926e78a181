pub mod ledger;
pub mod store;
pub mod valkey;

pub use ledger::{AttemptOutcome, LoginAttemptLedger};
pub use store::{AttemptStore, LedgerError, MemoryAttemptStore};
pub use valkey::ValkeyAttemptStore;
