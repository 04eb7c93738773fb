// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::Result;
use tempfile::TempDir;
use wallet::domain::{Account, Money, Payment};
use wallet::LedgerService;

pub const DEFAULT_PHONE: &str = "+992880806776";
pub const SECOND_PHONE: &str = "+992935444994";
pub const DEFAULT_BALANCE: Money = 10_000_00;

/// Helper to create an empty ledger and a scratch directory
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    Ok((LedgerService::new(), TempDir::new()?))
}

/// Test fixture: an account with a deposit and a list of payments
pub struct TestAccount {
    pub phone: &'static str,
    pub balance: Money,
    pub payments: Vec<(Money, &'static str)>,
}

impl TestAccount {
    /// One account funded with 10 000.00 that paid 1 000.00 for "auto"
    pub fn default_account() -> Self {
        Self {
            phone: DEFAULT_PHONE,
            balance: DEFAULT_BALANCE,
            payments: vec![(1000_00, "auto")],
        }
    }

    pub fn add_to(&self, service: &mut LedgerService) -> Result<(Account, Vec<Payment>)> {
        let account = service.register_account(self.phone)?;
        service.deposit(account.id, self.balance)?;

        let mut payments = Vec::new();
        for (amount, category) in &self.payments {
            payments.push(service.pay(account.id, *amount, *category)?);
        }

        let account = service.find_account_by_id(account.id)?.clone();
        Ok((account, payments))
    }
}

/// Read a file and return its lines
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    Ok(fs::read_to_string(path)?
        .lines()
        .map(str::to_string)
        .collect())
}

/// Sorted file names in a directory
pub fn file_names(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
