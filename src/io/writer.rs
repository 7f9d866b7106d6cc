use std::io::Write;

use crate::domain::{customer::Customer, transaction::CreditTransaction};

#[derive(serde::Serialize)]
/// Customer snapshot row.
///
/// Headers written (in this order):
/// `customer,name,phone,total_credit,last_transaction,status`.
struct CustomerRow<'a> {
    customer: u32,
    name: &'a str,
    phone: &'a str,
    total_credit: String,
    last_transaction: String,
    status: &'static str,
}

#[derive(serde::Serialize)]
struct TransactionRow<'a> {
    tx: u32,
    customer: u32,
    date: String,
    item: &'a str,
    amount: String,
    paid: String,
    remaining: String,
    status: &'static str,
}

/// Writes customer snapshots as CSV with a header row.
///
/// Rows are written in the order given; the stores iterate by ascending id.
/// Money is formatted with two decimals and a customer without transactions
/// gets an empty `last_transaction`.
///
/// # Examples
///
/// ```
/// use credit_ledger::domain::customer::Customer;
/// use credit_ledger::io::writer::write_customers;
///
/// let customers = vec![Customer::new(1, "A", "111")];
/// let mut out = Vec::new();
/// write_customers(&mut out, &customers).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(
///     s,
///     "customer,name,phone,total_credit,last_transaction,status\n1,A,111,0.00,,Cleared\n"
/// );
/// ```
pub fn write_customers<'a, W, I>(writer: W, customers: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Customer>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for c in customers {
        wtr.serialize(CustomerRow {
            customer: c.id,
            name: &c.name,
            phone: &c.phone,
            total_credit: c.total_credit.to_string_2dp(),
            last_transaction: c
                .last_transaction_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            status: c.status.as_str(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes credit transactions as CSV:
/// `tx,customer,date,item,amount,paid,remaining,status`.
pub fn write_transactions<'a, W, I>(writer: W, txs: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a CreditTransaction>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for tx in txs {
        wtr.serialize(TransactionRow {
            tx: tx.id,
            customer: tx.customer_id,
            date: tx.date.to_string(),
            item: &tx.item,
            amount: tx.amount.to_string_2dp(),
            paid: tx.paid().to_string_2dp(),
            remaining: tx.remaining().to_string_2dp(),
            status: tx.status.as_str(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
