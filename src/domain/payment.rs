use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{
    common::{error::AppError, money::Money},
    domain::transaction::TransactionId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentMode {
    Cash,
    Upi,
    Card,
    Cheque,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Cash,
        PaymentMode::Upi,
        PaymentMode::Card,
        PaymentMode::Cheque,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "Card",
            PaymentMode::Cheque => "Cheque",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMode::Cash),
            "upi" => Ok(PaymentMode::Upi),
            "card" => Ok(PaymentMode::Card),
            "cheque" => Ok(PaymentMode::Cheque),
            other => Err(format!(
                "unknown payment mode: {other} (expected cash, upi, card or cheque)"
            )),
        }
    }
}

/// A settlement applied against one credit transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub transaction_id: TransactionId,
    pub amount: Money,
    pub mode: PaymentMode,
    pub paid_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// The persisted shape of a payment: one append-only row per settlement,
/// keyed by the credit (transaction) it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub credit_id: TransactionId,
    pub shop: String,
    pub amount: Money,
    pub mode: PaymentMode,
    pub note: String,
    pub date: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn from_payment(payment: &Payment, shop: &str) -> Self {
        Self {
            credit_id: payment.transaction_id,
            shop: shop.to_string(),
            amount: payment.amount,
            mode: payment.mode,
            note: payment.note.clone().unwrap_or_default(),
            date: payment.paid_at,
        }
    }
}

/// Append-only destination for accepted payments.
pub trait PaymentRecordSink {
    fn append_record(&mut self, record: &PaymentRecord) -> Result<(), AppError>;
}

impl PaymentRecordSink for Vec<PaymentRecord> {
    fn append_record(&mut self, record: &PaymentRecord) -> Result<(), AppError> {
        self.push(record.clone());
        Ok(())
    }
}

impl<S: PaymentRecordSink + ?Sized> PaymentRecordSink for Box<S> {
    fn append_record(&mut self, record: &PaymentRecord) -> Result<(), AppError> {
        (**self).append_record(record)
    }
}
