//! Pure recomputation rules for credit transactions and the customer aggregate.
//!
//! Nothing here touches a store: each function takes the current values and
//! returns the next ones, and the handlers decide whether to commit them.

use serde::Deserialize;

use crate::{
    common::money::Money,
    domain::{
        customer::{CreditStatus, Customer},
        payment::Payment,
        transaction::CreditTransaction,
    },
};

/// How an accepted payment changes the transaction it settles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementPolicy {
    /// Any accepted payment clears the transaction, whatever its amount.
    #[default]
    FullClear,
    /// Payments reduce the remaining amount; the transaction clears at zero.
    Partial,
}

/// Sum of what is still owed across the pending transactions given.
pub fn outstanding<'a, I>(txs: I) -> Money
where
    I: IntoIterator<Item = &'a CreditTransaction>,
{
    txs.into_iter()
        .filter(|tx| tx.is_pending())
        .map(CreditTransaction::remaining)
        .sum()
}

/// Cleared iff none of the given transactions is pending.
pub fn derive_status<'a, I>(txs: I) -> CreditStatus
where
    I: IntoIterator<Item = &'a CreditTransaction>,
{
    if txs.into_iter().any(CreditTransaction::is_pending) {
        CreditStatus::Pending
    } else {
        CreditStatus::Cleared
    }
}

/// Rebuilds the derived fields of `customer` from that customer's transactions.
pub fn recompute_customer<'a, I>(customer: &Customer, txs: I) -> Customer
where
    I: IntoIterator<Item = &'a CreditTransaction>,
{
    let txs: Vec<&CreditTransaction> = txs
        .into_iter()
        .filter(|tx| tx.customer_id == customer.id)
        .collect();

    Customer {
        total_credit: outstanding(txs.iter().copied()),
        status: derive_status(txs.iter().copied()),
        last_transaction_date: txs.iter().map(|tx| tx.date).max(),
        ..customer.clone()
    }
}

/// Returns the transaction as it stands once `payment` is recorded on it.
///
/// The caller has already checked that the transaction is pending and that
/// the payment does not exceed the remaining amount.
pub fn apply_payment(
    tx: &CreditTransaction,
    payment: Payment,
    policy: SettlementPolicy,
) -> CreditTransaction {
    let mut next = tx.clone();
    next.payments.push(payment);

    let settled = match policy {
        SettlementPolicy::FullClear => true,
        SettlementPolicy::Partial => next.paid() >= next.amount,
    };
    if settled {
        next.status = CreditStatus::Cleared;
    }
    next
}
