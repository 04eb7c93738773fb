use crate::domain::{Account, AccountId, Favorite, FavoriteId, Payment, PaymentId, Phone};

use super::Table;

/// Statistics describing the repository contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryStats {
    pub account_count: usize,
    pub payment_count: usize,
    pub favorite_count: usize,
}

/// In-memory store for accounts, payments and favorites.
/// Holds no business rules; those live in the application layer.
#[derive(Debug, Default)]
pub struct Repository {
    last_account_id: AccountId,
    accounts: Table<AccountId, Account>,
    payments: Table<PaymentId, Payment>,
    favorites: Table<FavoriteId, Favorite>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            account_count: self.accounts.len(),
            payment_count: self.payments.len(),
            favorite_count: self.favorites.len(),
        }
    }

    // ========================
    // Account operations
    // ========================

    /// Allocate the next sequential account ID.
    pub fn next_account_id(&mut self) -> AccountId {
        self.last_account_id += 1;
        self.last_account_id
    }

    /// Make sure future allocations come after `id`.
    pub fn reserve_account_id(&mut self, id: AccountId) {
        self.last_account_id = self.last_account_id.max(id);
    }

    pub fn save_account(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    pub fn get_account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn get_account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    pub fn find_account_by_phone(&self, phone: &Phone) -> Option<&Account> {
        self.accounts.values().find(|account| &account.phone == phone)
    }

    pub fn list_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    // ========================
    // Payment operations
    // ========================

    pub fn save_payment(&mut self, payment: Payment) {
        self.payments.insert(payment.id, payment);
    }

    pub fn get_payment(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.get(&id)
    }

    pub fn get_payment_mut(&mut self, id: PaymentId) -> Option<&mut Payment> {
        self.payments.get_mut(&id)
    }

    pub fn list_payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.values()
    }

    pub fn list_payments_for_account(
        &self,
        account_id: AccountId,
    ) -> impl Iterator<Item = &Payment> {
        self.payments
            .values()
            .filter(move |payment| payment.account_id == account_id)
    }

    // ========================
    // Favorite operations
    // ========================

    pub fn save_favorite(&mut self, favorite: Favorite) {
        self.favorites.insert(favorite.id, favorite);
    }

    pub fn get_favorite(&self, id: FavoriteId) -> Option<&Favorite> {
        self.favorites.get(&id)
    }

    pub fn get_favorite_mut(&mut self, id: FavoriteId) -> Option<&mut Favorite> {
        self.favorites.get_mut(&id)
    }

    pub fn list_favorites(&self) -> impl Iterator<Item = &Favorite> {
        self.favorites.values()
    }
}
