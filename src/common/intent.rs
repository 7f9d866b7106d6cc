use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    common::money::Money,
    domain::{customer::CustomerId, payment::PaymentMode, transaction::TransactionId},
};

/// Who a new credit is for: an existing customer, or a customer to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    Existing(CustomerId),
    New { name: String, phone: String },
}

/// A new-credit submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredit {
    pub customer: CustomerRef,
    pub item: String,
    pub amount: Money,
    pub date: NaiveDate,
}

/// A settlement submission. `mode` stays optional so a blank selection is
/// reported as a field error rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub transaction_id: TransactionId,
    pub mode: Option<PaymentMode>,
    pub amount: Money,
    pub note: Option<String>,
    /// Defaults to the time the settlement is applied.
    pub paid_at: Option<DateTime<Utc>>,
}

/// Mutation intent sent from the reader to the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerIntent {
    AddCredit(NewCredit),
    SettlePayment(Settlement),
}
