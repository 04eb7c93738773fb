use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, Money};

pub type PaymentId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Debited from the account, not yet settled
    InProgress,
    Done,
    /// Rejected; the amount has been credited back
    Fail,
}

impl PaymentStatus {
    /// Text form used in dump files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::InProgress => "INPROGRESS",
            PaymentStatus::Done => "OK",
            PaymentStatus::Fail => "FAIL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "inprogress" | "in_progress" => Some(PaymentStatus::InProgress),
            "ok" | "done" => Some(PaymentStatus::Done),
            "fail" => Some(PaymentStatus::Fail),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A debit against an account. Amount and category never change after creation;
/// only the status moves to `Fail` on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub account_id: AccountId,
    /// Amount in minor units (always positive)
    pub amount: Money,
    /// Free-form tag (e.g., "auto", "food")
    pub category: String,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn new(account_id: AccountId, amount: Money, category: impl Into<String>) -> Self {
        assert!(amount > 0, "Payment amount must be positive");
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            category: category.into(),
            status: PaymentStatus::InProgress,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == PaymentStatus::Fail
    }
}
