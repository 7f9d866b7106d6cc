//! Retail credit ledger: customers buy on credit, payments settle the
//! credit transactions, and each customer's outstanding total and status are
//! recomputed from their transactions after every accepted change.

pub mod app;
pub mod common;
pub mod config;
pub mod domain;
pub mod io;
pub mod telemetry;
pub mod worker;
