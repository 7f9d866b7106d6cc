pub mod payment_log;
pub mod reader;
pub mod writer;
