use chrono::NaiveDate;

use crate::common::money::Money;

pub type CustomerId = u32;

/// Two-state status shared by transactions and the customer aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditStatus {
    Pending,
    Cleared,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditStatus::Pending => "Pending",
            CreditStatus::Cleared => "Cleared",
        }
    }
}

/// Customer aggregate. `total_credit`, `status` and `last_transaction_date`
/// are derived from the customer's transactions and only ever written by
/// [`crate::domain::credit::recompute_customer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub total_credit: Money,
    pub last_transaction_date: Option<NaiveDate>,
    pub status: CreditStatus,
    /// Pre-paid balance, tracked apart from credit owed.
    pub advance: Option<Money>,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            total_credit: Money::zero(),
            last_transaction_date: None,
            status: CreditStatus::Cleared,
            advance: None,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.status == CreditStatus::Cleared
    }
}
