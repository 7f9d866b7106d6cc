use std::fmt;

use crate::{
    common::money::Money,
    domain::{customer::CustomerId, transaction::TransactionId},
};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("missing input csv path. usage: credit-ledger <intents.csv>")]
    MissingArg,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Input field an intent was rejected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Customer,
    Name,
    Phone,
    Item,
    Amount,
    Mode,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Customer => "customer",
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Item => "item",
            Field::Amount => "amount",
            Field::Mode => "mode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Referential,
    BusinessRule,
}

/// Why the ledger refused an intent. Every variant leaves the stores untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid input: {}", join_fields(.0))]
    Invalid(Vec<FieldError>),
    #[error("unknown customer {0}")]
    UnknownCustomer(CustomerId),
    #[error("unknown transaction {0}")]
    UnknownTransaction(TransactionId),
    #[error("transaction {0} is already cleared")]
    AlreadyCleared(TransactionId),
    #[error("payment of {amount} exceeds remaining balance {remaining} on transaction {tx}")]
    ExceedsBalance {
        tx: TransactionId,
        amount: Money,
        remaining: Money,
    },
    #[error("credit of {0} would overflow the ledger's issued total")]
    TotalOverflow(Money),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Invalid(_) => ErrorKind::Validation,
            LedgerError::UnknownCustomer(_) | LedgerError::UnknownTransaction(_) => {
                ErrorKind::Referential
            }
            LedgerError::AlreadyCleared(_)
            | LedgerError::ExceedsBalance { .. }
            | LedgerError::TotalOverflow(_) => ErrorKind::BusinessRule,
        }
    }

    /// Field-level errors, empty for non-validation failures.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            LedgerError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
