// Application layer - the ledger's use cases.
// Every state change goes through LedgerService; io/ and cli/ only call into it.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
