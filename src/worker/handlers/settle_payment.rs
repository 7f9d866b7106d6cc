use chrono::Utc;
use tracing::{debug, info};

use crate::{
    common::{
        error::{Field, FieldError, LedgerError},
        intent::Settlement,
    },
    domain::{
        credit,
        ledger::{Ledger, SettlementSnapshot},
        payment::{Payment, PaymentMode},
    },
};

pub fn handle(ledger: &mut Ledger, input: Settlement) -> Result<SettlementSnapshot, LedgerError> {
    let mode = validate(&input)?;

    let tx = ledger
        .txs
        .get(input.transaction_id)
        .ok_or(LedgerError::UnknownTransaction(input.transaction_id))?;

    // cleared is terminal
    if !tx.is_pending() {
        return Err(LedgerError::AlreadyCleared(tx.id));
    }

    let remaining = tx.remaining();
    if input.amount > remaining {
        return Err(LedgerError::ExceedsBalance {
            tx: tx.id,
            amount: input.amount,
            remaining,
        });
    }

    let owner = ledger
        .customers
        .get(tx.customer_id)
        .ok_or(LedgerError::UnknownCustomer(tx.customer_id))?;

    let payment = Payment {
        transaction_id: tx.id,
        amount: input.amount,
        mode,
        paid_at: input.paid_at.unwrap_or_else(Utc::now),
        note: input
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };

    let next_tx = credit::apply_payment(tx, payment.clone(), ledger.policy());
    let customer = credit::recompute_customer(
        owner,
        ledger
            .txs
            .for_customer(owner.id)
            .map(|t| if t.id == next_tx.id { &next_tx } else { t }),
    );
    debug!(
        customer = customer.id,
        total_credit = %customer.total_credit,
        status = customer.status.as_str(),
        "customer recomputed"
    );

    ledger.commit(customer.clone(), next_tx.clone());
    info!(
        tx = next_tx.id,
        amount = %payment.amount,
        mode = %payment.mode,
        status = next_tx.status.as_str(),
        "payment settled"
    );

    Ok(SettlementSnapshot {
        customer,
        transaction: next_tx,
        payment,
    })
}

fn validate(input: &Settlement) -> Result<PaymentMode, LedgerError> {
    let mut errors = Vec::new();

    if input.mode.is_none() {
        errors.push(FieldError::new(Field::Mode, "payment mode is required"));
    }
    if !input.amount.is_positive() {
        errors.push(FieldError::new(
            Field::Amount,
            "amount must be greater than zero",
        ));
    }

    match input.mode {
        Some(mode) if errors.is_empty() => Ok(mode),
        _ => Err(LedgerError::Invalid(errors)),
    }
}
