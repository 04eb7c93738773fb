use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::application::{LedgerError, LedgerService};
use crate::domain::{Account, Favorite, Payment};

use super::format::{self, Layout, Record, ACCOUNTS_FILE, FAVORITES_FILE, PAYMENTS_FILE};

/// Number of records applied by a dump import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub accounts: usize,
    pub payments: usize,
    pub favorites: usize,
}

/// Importer for loading text files into the ledger
pub struct Importer<'a> {
    service: &'a mut LedgerService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a mut LedgerService) -> Self {
        Self { service }
    }

    /// Load `accounts.dump`, `payments.dump` and `favorites.dump` from `dir`,
    /// in that order, merging each record into the ledger by ID.
    ///
    /// A missing file is skipped. A malformed file is rejected as a whole before
    /// any of its records are applied; files imported before it stay applied.
    pub fn import_dump(&mut self, dir: impl AsRef<Path>) -> Result<ImportSummary, LedgerError> {
        let dir = dir.as_ref();
        let mut summary = ImportSummary::default();

        if let Some(accounts) = read_dump::<Account>(&dir.join(ACCOUNTS_FILE))? {
            summary.accounts = accounts.len();
            for account in accounts {
                self.service.restore_account(account);
            }
        }

        if let Some(payments) = read_dump::<Payment>(&dir.join(PAYMENTS_FILE))? {
            summary.payments = payments.len();
            for payment in payments {
                self.service.restore_payment(payment);
            }
        }

        if let Some(favorites) = read_dump::<Favorite>(&dir.join(FAVORITES_FILE))? {
            summary.favorites = favorites.len();
            for favorite in favorites {
                self.service.restore_favorite(favorite);
            }
        }

        info!(
            dir = %dir.display(),
            accounts = summary.accounts,
            payments = summary.payments,
            favorites = summary.favorites,
            "ledger imported"
        );
        Ok(summary)
    }

    /// Load accounts from a legacy `id;phone;balance|` file.
    /// Records are stored as-is; duplicate phones are not checked.
    pub fn import_legacy(&mut self, path: impl AsRef<Path>) -> Result<usize, LedgerError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|err| LedgerError::io(path, err))?;
        let accounts: Vec<Account> = format::decode(&data, Layout::LEGACY, path)?;

        let count = accounts.len();
        for account in accounts {
            self.service.load_account(account);
        }

        info!(path = %path.display(), accounts = count, "accounts imported from legacy file");
        Ok(count)
    }
}

fn read_dump<T: Record>(path: &Path) -> Result<Option<Vec<T>>, LedgerError> {
    match fs::read(path) {
        Ok(data) => format::decode(&data, Layout::DUMP, path).map(Some),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "dump file not found, nothing to import");
            Ok(None)
        }
        Err(err) => Err(LedgerError::io(path, err)),
    }
}
