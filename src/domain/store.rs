use std::collections::BTreeMap;

use crate::domain::{
    customer::{Customer, CustomerId},
    transaction::{CreditTransaction, TransactionId},
};

/// Customers keyed by id. Ids are handed out sequentially starting at 1.
#[derive(Debug, Default)]
pub struct CustomerStore {
    customers: BTreeMap<CustomerId, Customer>,
    last_id: CustomerId,
}

impl CustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> CustomerId {
        self.last_id + 1
    }

    /// Inserts or replaces a customer.
    pub fn put(&mut self, customer: Customer) {
        self.last_id = self.last_id.max(customer.id);
        self.customers.insert(customer.id, customer);
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn contains(&self, id: CustomerId) -> bool {
        self.customers.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

/// Credit transactions in creation order.
#[derive(Debug, Default)]
pub struct TransactionStore {
    txs: BTreeMap<TransactionId, CreditTransaction>,
    last_id: TransactionId,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> TransactionId {
        self.last_id + 1
    }

    /// Inserts or replaces a transaction.
    pub fn put(&mut self, tx: CreditTransaction) {
        self.last_id = self.last_id.max(tx.id);
        self.txs.insert(tx.id, tx);
    }

    pub fn get(&self, id: TransactionId) -> Option<&CreditTransaction> {
        self.txs.get(&id)
    }

    pub fn for_customer(
        &self,
        customer_id: CustomerId,
    ) -> impl Iterator<Item = &CreditTransaction> {
        self.txs
            .values()
            .filter(move |tx| tx.customer_id == customer_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreditTransaction> {
        self.txs.values()
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}
