pub mod add_credit;
pub mod settle_payment;
