use crate::{
    common::{
        error::LedgerError,
        intent::{NewCredit, Settlement},
    },
    domain::{
        credit::SettlementPolicy,
        customer::{Customer, CustomerId},
        payment::Payment,
        store::{CustomerStore, TransactionStore},
        summary::LedgerSummary,
        transaction::{CreditTransaction, TransactionId},
    },
    worker::handlers::{add_credit, settle_payment},
};

/// State of a customer and the transaction just created for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditSnapshot {
    pub customer: Customer,
    pub transaction: CreditTransaction,
}

/// State of a customer and transaction right after a payment was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementSnapshot {
    pub customer: Customer,
    pub transaction: CreditTransaction,
    pub payment: Payment,
}

/// The credit ledger service: owns both stores and is the only writer to them.
#[derive(Debug, Default)]
pub struct Ledger {
    pub(crate) customers: CustomerStore,
    pub(crate) txs: TransactionStore,
    policy: SettlementPolicy,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SettlementPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> SettlementPolicy {
        self.policy
    }

    pub fn add_credit(&mut self, input: NewCredit) -> Result<CreditSnapshot, LedgerError> {
        add_credit::handle(self, input)
    }

    pub fn settle_payment(
        &mut self,
        input: Settlement,
    ) -> Result<SettlementSnapshot, LedgerError> {
        settle_payment::handle(self, input)
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&CreditTransaction> {
        self.txs.get(id)
    }

    pub fn customers(&self) -> &CustomerStore {
        &self.customers
    }

    pub fn transactions(&self) -> &TransactionStore {
        &self.txs
    }

    pub fn transactions_for(
        &self,
        customer_id: CustomerId,
    ) -> impl Iterator<Item = &CreditTransaction> {
        self.txs.for_customer(customer_id)
    }

    /// Payments recorded against a transaction, oldest first.
    pub fn payment_history(&self, id: TransactionId) -> Result<&[Payment], LedgerError> {
        self.txs
            .get(id)
            .map(|tx| tx.payments.as_slice())
            .ok_or(LedgerError::UnknownTransaction(id))
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_ledger(self)
    }

    /// Writes a customer and one of their transactions in a single step.
    pub(crate) fn commit(&mut self, customer: Customer, tx: CreditTransaction) {
        self.txs.put(tx);
        self.customers.put(customer);
    }
}
