use std::fs;
use std::path::Path;

use tracing::info;

use crate::application::{LedgerError, LedgerService};
use crate::domain::AccountId;

use super::format::{self, Layout, Record, ACCOUNTS_FILE, FAVORITES_FILE, PAYMENTS_FILE};
use super::history::history_to_files;

/// Number of records written by a dump export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub accounts: usize,
    pub payments: usize,
    pub favorites: usize,
}

/// Exporter for writing ledger data to text files
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Write `accounts.dump`, `payments.dump` and `favorites.dump` under `dir`.
    /// A file is only written when there is at least one record of its kind.
    /// Files are written one after another; a failure leaves earlier ones in place.
    pub fn export_dump(&self, dir: impl AsRef<Path>) -> Result<ExportSummary, LedgerError> {
        let dir = dir.as_ref();

        let summary = ExportSummary {
            accounts: write_dump(&dir.join(ACCOUNTS_FILE), self.service.list_accounts())?,
            payments: write_dump(&dir.join(PAYMENTS_FILE), self.service.list_payments())?,
            favorites: write_dump(&dir.join(FAVORITES_FILE), self.service.list_favorites())?,
        };

        info!(
            dir = %dir.display(),
            format_version = format::FORMAT_VERSION,
            accounts = summary.accounts,
            payments = summary.payments,
            favorites = summary.favorites,
            "ledger exported"
        );
        Ok(summary)
    }

    /// Write all accounts to a single legacy `id;phone;balance|` file.
    pub fn export_legacy(&self, path: impl AsRef<Path>) -> Result<usize, LedgerError> {
        let path = path.as_ref();
        let accounts = self.service.list_accounts();
        let buffer = format::encode(accounts.iter().copied(), Layout::LEGACY)?;
        write_file(path, &buffer)?;

        info!(
            path = %path.display(),
            format_version = format::FORMAT_VERSION,
            accounts = accounts.len(),
            "accounts exported to legacy file"
        );
        Ok(accounts.len())
    }

    /// Export one account's payment history as chunked files under `dir`.
    /// Returns the number of files written.
    pub fn export_account_history(
        &self,
        account_id: AccountId,
        dir: impl AsRef<Path>,
        chunk_size: usize,
    ) -> Result<usize, LedgerError> {
        let payments = self.service.export_account_history(account_id)?;
        history_to_files(&payments, dir, chunk_size)
    }
}

fn write_dump<T: Record>(path: &Path, records: Vec<&T>) -> Result<usize, LedgerError> {
    if records.is_empty() {
        return Ok(0);
    }
    let buffer = format::encode(records.iter().copied(), Layout::DUMP)?;
    write_file(path, &buffer)?;
    Ok(records.len())
}

pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<(), LedgerError> {
    fs::write(path, contents).map_err(|err| LedgerError::io(path, err))
}
