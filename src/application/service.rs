use tracing::{debug, info, warn};

use crate::domain::{
    Account, AccountId, Favorite, FavoriteId, Money, Payment, PaymentId, PaymentStatus, Phone,
};
use crate::storage::{Repository, RepositoryStats};

use super::LedgerError;

/// Application service providing every ledger operation.
/// This is the primary interface for any client (CLI, import/export, tests).
///
/// The service is a plain owned value: mutations take `&mut self`, so a caller
/// sharing it across threads has to wrap it in a single lock.
#[derive(Debug, Default)]
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> RepositoryStats {
        self.repo.stats()
    }

    // ========================
    // Account operations
    // ========================

    /// Register a new zero-balance account under `phone`.
    pub fn register_account(&mut self, phone: impl Into<Phone>) -> Result<Account, LedgerError> {
        let phone = phone.into();
        if self.repo.find_account_by_phone(&phone).is_some() {
            return Err(LedgerError::PhoneAlreadyRegistered(phone));
        }

        let account = Account::new(self.repo.next_account_id(), phone);
        self.repo.save_account(account.clone());

        info!(account_id = account.id, phone = %account.phone, "account registered");
        Ok(account)
    }

    /// Get an account by ID.
    pub fn find_account_by_id(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.repo
            .get_account(id)
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// List all accounts in registration order.
    pub fn list_accounts(&self) -> Vec<&Account> {
        self.repo.list_accounts().collect()
    }

    /// Credit `amount` to an account.
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::AmountMustBePositive(amount));
        }

        let account = self
            .repo
            .get_account_mut(account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;
        account.balance = credit(account, amount)?;

        info!(account_id, amount, balance = account.balance, "deposit");
        Ok(())
    }

    // ========================
    // Payment operations
    // ========================

    /// Debit an account and record an in-progress payment.
    pub fn pay(
        &mut self,
        account_id: AccountId,
        amount: Money,
        category: impl Into<String>,
    ) -> Result<Payment, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::AmountMustBePositive(amount));
        }

        let account = self
            .repo
            .get_account_mut(account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        if !account.can_afford(amount) {
            return Err(LedgerError::NotEnoughBalance {
                account_id,
                balance: account.balance,
                required: amount,
            });
        }
        account.balance -= amount;

        let payment = Payment::new(account_id, amount, category);
        self.repo.save_payment(payment.clone());

        info!(
            payment_id = %payment.id,
            account_id,
            amount,
            category = %payment.category,
            "payment recorded"
        );
        Ok(payment)
    }

    /// Get a payment by ID.
    pub fn find_payment_by_id(&self, id: PaymentId) -> Result<&Payment, LedgerError> {
        self.repo
            .get_payment(id)
            .ok_or(LedgerError::PaymentNotFound(id))
    }

    /// List all payments in storage order.
    pub fn list_payments(&self) -> Vec<&Payment> {
        self.repo.list_payments().collect()
    }

    /// Mark a payment as failed and credit its amount back to the account.
    ///
    /// Rejecting a payment that already failed succeeds without crediting again.
    pub fn reject(&mut self, payment_id: PaymentId) -> Result<(), LedgerError> {
        let payment = self
            .repo
            .get_payment(payment_id)
            .ok_or(LedgerError::PaymentNotFound(payment_id))?;
        let (account_id, amount, already_failed) =
            (payment.account_id, payment.amount, payment.is_failed());

        let account = self
            .repo
            .get_account_mut(account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        if already_failed {
            warn!(%payment_id, "payment already rejected, balance left unchanged");
            return Ok(());
        }
        account.balance = credit(account, amount)?;

        if let Some(payment) = self.repo.get_payment_mut(payment_id) {
            payment.status = PaymentStatus::Fail;
        }

        info!(%payment_id, account_id, amount, "payment rejected");
        Ok(())
    }

    /// Issue a new payment with the same account, amount and category as `payment_id`.
    pub fn repeat(&mut self, payment_id: PaymentId) -> Result<Payment, LedgerError> {
        let original = self.find_payment_by_id(payment_id)?.clone();
        debug!(%payment_id, "repeating payment");
        self.pay(original.account_id, original.amount, original.category)
    }

    // ========================
    // Favorite operations
    // ========================

    /// Save a payment as a named template.
    pub fn favorite_payment(
        &mut self,
        payment_id: PaymentId,
        name: impl Into<String>,
    ) -> Result<Favorite, LedgerError> {
        let payment = self.find_payment_by_id(payment_id)?;
        let favorite = Favorite::from_payment(payment, name);
        self.repo.save_favorite(favorite.clone());

        info!(favorite_id = %favorite.id, %payment_id, name = %favorite.name, "favorite created");
        Ok(favorite)
    }

    /// Get a favorite by ID.
    pub fn find_favorite_by_id(&self, id: FavoriteId) -> Result<&Favorite, LedgerError> {
        self.repo
            .get_favorite(id)
            .ok_or(LedgerError::FavoriteNotFound(id))
    }

    /// List all favorites in creation order.
    pub fn list_favorites(&self) -> Vec<&Favorite> {
        self.repo.list_favorites().collect()
    }

    /// Pay using a favorite's stored account, amount and category.
    pub fn pay_from_favorite(&mut self, favorite_id: FavoriteId) -> Result<Payment, LedgerError> {
        let favorite = self.find_favorite_by_id(favorite_id)?.clone();
        debug!(%favorite_id, "paying from favorite");
        self.pay(favorite.account_id, favorite.amount, favorite.category)
    }

    // ========================
    // History
    // ========================

    /// Copies of every payment made from `account_id`, in storage order.
    pub fn export_account_history(&self, account_id: AccountId) -> Result<Vec<Payment>, LedgerError> {
        self.find_account_by_id(account_id)?;
        Ok(self
            .repo
            .list_payments_for_account(account_id)
            .cloned()
            .collect())
    }

    // ========================
    // Import reconciliation
    // ========================

    /// Merge a dumped account: overwrite it when the ID is known, otherwise
    /// store it under its dumped ID so payments and favorites keep pointing at it.
    pub(crate) fn restore_account(&mut self, record: Account) -> AccountId {
        let account_id = record.id;
        if let Some(account) = self.repo.get_account_mut(account_id) {
            account.phone = record.phone;
            account.balance = record.balance;
            debug!(account_id, "account overwritten from dump");
            return account_id;
        }

        if let Some(owner) = self.repo.find_account_by_phone(&record.phone) {
            warn!(
                account_id,
                other_account_id = owner.id,
                phone = %record.phone,
                "dumped account shares its phone with another account"
            );
        }

        self.repo.reserve_account_id(account_id);
        self.repo.save_account(record);
        debug!(account_id, "account restored from dump");
        account_id
    }

    /// Store a legacy record as-is. No phone uniqueness check; a known ID is replaced.
    pub(crate) fn load_account(&mut self, record: Account) {
        self.repo.reserve_account_id(record.id);
        debug!(account_id = record.id, "account loaded from legacy file");
        self.repo.save_account(record);
    }

    /// Merge a dumped payment: overwrite the known one or append it.
    pub(crate) fn restore_payment(&mut self, record: Payment) {
        match self.repo.get_payment_mut(record.id) {
            Some(payment) => {
                payment.account_id = record.account_id;
                payment.amount = record.amount;
                payment.category = record.category;
                payment.status = record.status;
                debug!(payment_id = %record.id, "payment overwritten from dump");
            }
            None => self.repo.save_payment(record),
        }
    }

    /// Merge a dumped favorite: overwrite the known one or append it.
    pub(crate) fn restore_favorite(&mut self, record: Favorite) {
        match self.repo.get_favorite_mut(record.id) {
            Some(favorite) => {
                favorite.account_id = record.account_id;
                favorite.name = record.name;
                favorite.amount = record.amount;
                favorite.category = record.category;
                debug!(favorite_id = %record.id, "favorite overwritten from dump");
            }
            None => self.repo.save_favorite(record),
        }
    }
}

fn credit(account: &Account, amount: Money) -> Result<Money, LedgerError> {
    account
        .balance
        .checked_add(amount)
        .ok_or(LedgerError::BalanceOverflow {
            account_id: account.id,
            balance: account.balance,
            amount,
        })
}
