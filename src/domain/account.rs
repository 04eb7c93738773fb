use serde::{Deserialize, Serialize};

use super::Money;

pub type AccountId = i64;

/// Phone number an account is registered under. Compared verbatim, no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Phone {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Phone {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Sequential identifier, assigned by the ledger starting at 1
    pub id: AccountId,
    pub phone: Phone,
    /// Current balance in minor units
    pub balance: Money,
}

impl Account {
    /// Create a zero-balance account.
    pub fn new(id: AccountId, phone: Phone) -> Self {
        Self {
            id,
            phone,
            balance: 0,
        }
    }

    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }

    pub fn can_afford(&self, amount: Money) -> bool {
        self.balance >= amount
    }
}
