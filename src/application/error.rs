use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{AccountId, FavoriteId, Money, PaymentId, Phone};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Amount must be greater than zero, got {0}")]
    AmountMustBePositive(Money),

    #[error("Balance of account {account_id} would overflow: balance {balance}, adding {amount}")]
    BalanceOverflow {
        account_id: AccountId,
        balance: Money,
        amount: Money,
    },

    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    #[error("Favorite not found: {0}")]
    FavoriteNotFound(FavoriteId),

    #[error("Not enough balance on account {account_id}: balance {balance}, required {required}")]
    NotEnoughBalance {
        account_id: AccountId,
        balance: Money,
        required: Money,
    },

    #[error("Phone already registered: {0}")]
    PhoneAlreadyRegistered(Phone),

    #[error("{}:{line}: invalid {field}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        field: &'static str,
        reason: String,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Coarse classification of ledger failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InsufficientFunds,
    Duplicate,
    Parse,
    Io,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::AmountMustBePositive(_)
            | LedgerError::BalanceOverflow { .. }
            | LedgerError::InvalidChunkSize => ErrorKind::Validation,
            LedgerError::AccountNotFound(_)
            | LedgerError::PaymentNotFound(_)
            | LedgerError::FavoriteNotFound(_) => ErrorKind::NotFound,
            LedgerError::NotEnoughBalance { .. } => ErrorKind::InsufficientFunds,
            LedgerError::PhoneAlreadyRegistered(_) => ErrorKind::Duplicate,
            LedgerError::Parse { .. } => ErrorKind::Parse,
            LedgerError::Io { .. } => ErrorKind::Io,
            LedgerError::Csv(err) if err.is_io_error() => ErrorKind::Io,
            LedgerError::Csv(_) => ErrorKind::Parse,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }
}
