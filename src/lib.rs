//! In-memory wallet ledger: accounts, payments and favorite payment templates,
//! persisted as semicolon-delimited text dumps.

pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod storage;

pub use application::{ErrorKind, LedgerError, LedgerService};
pub use domain::*;
pub use storage::Repository;
