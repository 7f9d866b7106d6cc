use chrono::NaiveDate;

use crate::{
    common::money::Money,
    domain::{
        customer::{CreditStatus, CustomerId},
        payment::Payment,
    },
};

pub type TransactionId = u32;

/// A single purchase made on credit by a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditTransaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub date: NaiveDate,
    pub item: String,
    pub amount: Money,
    pub status: CreditStatus,
    /// Settlements in the order they were accepted.
    pub payments: Vec<Payment>,
}

impl CreditTransaction {
    pub fn new(
        id: TransactionId,
        customer_id: CustomerId,
        date: NaiveDate,
        item: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id,
            customer_id,
            date,
            item: item.into(),
            amount,
            status: CreditStatus::Pending,
            payments: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == CreditStatus::Pending
    }

    pub fn paid(&self) -> Money {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Amount still owed. Zero once the transaction is cleared, whatever was paid.
    pub fn remaining(&self) -> Money {
        match self.status {
            CreditStatus::Cleared => Money::zero(),
            CreditStatus::Pending => self.amount - self.paid(),
        }
    }
}
