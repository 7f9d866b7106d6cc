use std::collections::BTreeMap;

use crate::{
    common::money::Money,
    domain::{credit, ledger::Ledger, payment::PaymentMode},
};

/// Figures behind the dashboard's credit cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub customers: usize,
    pub pending_customers: usize,
    /// Total still owed across all pending transactions.
    pub outstanding: Money,
    /// Total ever given on credit.
    pub credit_issued: Money,
    pub collected: Money,
    pub collected_by_mode: BTreeMap<PaymentMode, Money>,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let txs = ledger.transactions();

        let mut collected_by_mode = BTreeMap::new();
        for payment in txs.iter().flat_map(|tx| tx.payments.iter()) {
            *collected_by_mode.entry(payment.mode).or_insert(Money::zero()) += payment.amount;
        }

        Self {
            customers: ledger.customers().len(),
            pending_customers: ledger
                .customers()
                .iter()
                .filter(|c| !c.is_cleared())
                .count(),
            outstanding: credit::outstanding(txs.iter()),
            credit_issued: txs.iter().map(|tx| tx.amount).sum(),
            collected: collected_by_mode.values().sum(),
            collected_by_mode,
        }
    }
}
