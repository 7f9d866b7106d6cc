pub mod credit;
pub mod customer;
pub mod ledger;
pub mod payment;
pub mod store;
pub mod summary;
pub mod transaction;
