use std::iter;

use tracing::{debug, info};

use crate::{
    common::{
        error::{Field, FieldError, LedgerError},
        intent::{CustomerRef, NewCredit},
        money::Money,
    },
    domain::{
        credit,
        customer::Customer,
        ledger::{CreditSnapshot, Ledger},
        transaction::CreditTransaction,
    },
};

pub fn handle(ledger: &mut Ledger, input: NewCredit) -> Result<CreditSnapshot, LedgerError> {
    validate(&input)?;

    let owner = match &input.customer {
        CustomerRef::Existing(id) => ledger
            .customers
            .get(*id)
            .cloned()
            .ok_or(LedgerError::UnknownCustomer(*id))?,
        CustomerRef::New { name, phone } => {
            Customer::new(ledger.customers.next_id(), name.trim(), phone.trim())
        }
    };

    // every customer total and summary figure is bounded by the issued total
    ledger
        .txs
        .iter()
        .try_fold(input.amount, |total, t| total.checked_add(t.amount))
        .ok_or(LedgerError::TotalOverflow(input.amount))?;

    let tx = CreditTransaction::new(
        ledger.txs.next_id(),
        owner.id,
        input.date,
        input.item.trim(),
        input.amount,
    );

    let customer = credit::recompute_customer(
        &owner,
        ledger.txs.for_customer(owner.id).chain(iter::once(&tx)),
    );
    debug!(
        customer = customer.id,
        total_credit = %customer.total_credit,
        "customer recomputed"
    );

    ledger.commit(customer.clone(), tx.clone());
    info!(
        customer = customer.id,
        tx = tx.id,
        amount = %tx.amount,
        "credit added"
    );

    Ok(CreditSnapshot {
        customer,
        transaction: tx,
    })
}

fn validate(input: &NewCredit) -> Result<(), LedgerError> {
    let mut errors = Vec::new();

    if let CustomerRef::New { name, phone } = &input.customer {
        let name_blank = name.trim().is_empty();
        let phone_blank = phone.trim().is_empty();
        if name_blank && phone_blank {
            errors.push(FieldError::new(
                Field::Customer,
                "select a customer or enter a name and phone",
            ));
        } else if name_blank {
            errors.push(FieldError::new(Field::Name, "name is required"));
        } else if phone_blank {
            errors.push(FieldError::new(Field::Phone, "phone is required"));
        }
    }

    if input.item.trim().is_empty() {
        errors.push(FieldError::new(Field::Item, "item is required"));
    }

    if !input.amount.is_positive() {
        errors.push(FieldError::new(
            Field::Amount,
            "amount must be greater than zero",
        ));
    } else if input.amount > Money::MAX {
        errors.push(FieldError::new(
            Field::Amount,
            format!("amount must not exceed {}", Money::MAX),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::Invalid(errors))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        common::error::ErrorKind,
        domain::{credit::outstanding, customer::CreditStatus},
    };

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn for_new(name: &str, phone: &str, item: &str, amount: i64) -> NewCredit {
        NewCredit {
            customer: CustomerRef::New {
                name: name.into(),
                phone: phone.into(),
            },
            item: item.into(),
            amount: Money::from_major(amount),
            date: date(1),
        }
    }

    fn for_existing(id: u32, amount: i64, day: u32) -> NewCredit {
        NewCredit {
            customer: CustomerRef::Existing(id),
            item: "Soap".into(),
            amount: Money::from_major(amount),
            date: date(day),
        }
    }

    #[test]
    fn new_customer_gets_pending_credit_and_one_transaction() {
        let mut ledger = Ledger::new();

        let snap = handle(&mut ledger, for_new("A", "111", "X", 500)).unwrap();

        assert_eq!(snap.customer.name, "A");
        assert_eq!(snap.customer.phone, "111");
        assert_eq!(snap.customer.total_credit, Money::from_major(500));
        assert_eq!(snap.customer.status, CreditStatus::Pending);
        assert_eq!(snap.customer.last_transaction_date, Some(date(1)));

        assert_eq!(snap.transaction.customer_id, snap.customer.id);
        assert_eq!(snap.transaction.amount, Money::from_major(500));
        assert_eq!(snap.transaction.status, CreditStatus::Pending);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn existing_customer_accumulates_credit() {
        let mut ledger = Ledger::new();
        let first = handle(&mut ledger, for_new("A", "111", "X", 500)).unwrap();
        let id = first.customer.id;

        let second = handle(&mut ledger, for_existing(id, 300, 9)).unwrap();

        assert_eq!(second.customer.id, id);
        assert_eq!(second.customer.total_credit, Money::from_major(800));
        assert_eq!(second.customer.last_transaction_date, Some(date(9)));
        assert_ne!(second.transaction.id, first.transaction.id);
        assert_eq!(ledger.customers().len(), 1);

        let stored = ledger.customer(id).unwrap();
        assert_eq!(stored.total_credit, outstanding(ledger.transactions_for(id)));
    }

    #[test]
    fn trims_text_fields() {
        let mut ledger = Ledger::new();
        let snap = handle(&mut ledger, for_new("  Asha ", " 111 ", "  Dal  ", 50)).unwrap();
        assert_eq!(snap.customer.name, "Asha");
        assert_eq!(snap.customer.phone, "111");
        assert_eq!(snap.transaction.item, "Dal");
    }

    #[test]
    fn reports_every_invalid_field_and_mutates_nothing() {
        let mut ledger = Ledger::new();

        let err = handle(&mut ledger, for_new("", "", " ", 0)).unwrap_err();

        let fields: Vec<Field> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Customer, Field::Item, Field::Amount]);
        assert!(ledger.customers().is_empty());
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn missing_phone_is_its_own_field_error() {
        let mut ledger = Ledger::new();
        let err = handle(&mut ledger, for_new("A", "", "X", 10)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Invalid(vec![FieldError::new(Field::Phone, "phone is required")])
        );
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut ledger = Ledger::new();
        let mut input = for_new("A", "111", "X", 1);
        input.amount = Money::from_minor(-100);

        let err = handle(&mut ledger, input).unwrap_err();
        assert_eq!(err.field_errors()[0].field, Field::Amount);
    }

    #[test]
    fn unknown_customer_is_referential_and_mutates_nothing() {
        let mut ledger = Ledger::new();
        handle(&mut ledger, for_new("A", "111", "X", 500)).unwrap();

        let err = handle(&mut ledger, for_existing(42, 100, 2)).unwrap_err();

        assert_eq!(err, LedgerError::UnknownCustomer(42));
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.customers().len(), 1);
    }

    #[test]
    fn new_credit_reopens_a_cleared_customer() {
        let mut ledger = Ledger::new();
        let first = handle(&mut ledger, for_new("A", "111", "X", 500)).unwrap();
        let id = first.customer.id;

        // clear the first transaction directly
        let mut tx = first.transaction.clone();
        tx.status = CreditStatus::Cleared;
        let cleared = credit::recompute_customer(&first.customer, iter::once(&tx));
        ledger.commit(cleared, tx);
        assert!(ledger.customer(id).unwrap().is_cleared());

        let snap = handle(&mut ledger, for_existing(id, 300, 3)).unwrap();
        assert_eq!(snap.customer.status, CreditStatus::Pending);
        assert_eq!(snap.customer.total_credit, Money::from_major(300));
    }

    #[test]
    fn amount_above_max_is_a_field_error() {
        let mut ledger = Ledger::new();
        let mut input = for_new("A", "111", "X", 1);
        input.amount = Money::from_minor(i64::MAX);

        let err = handle(&mut ledger, input).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field_errors()[0].field, Field::Amount);
        assert!(ledger.customers().is_empty());
    }

    #[test]
    fn credit_that_would_overflow_totals_is_refused() {
        let mut ledger = Ledger::new();
        let first = handle(&mut ledger, for_new("A", "111", "X", 1)).unwrap();
        let id = first.customer.id;

        // a settled bulk credit close to the integer limit
        let mut bulk = CreditTransaction::new(
            ledger.txs.next_id(),
            id,
            date(2),
            "Bulk",
            Money::from_minor(i64::MAX - Money::MAX.as_minor()),
        );
        bulk.status = CreditStatus::Cleared;
        let customer = credit::recompute_customer(
            &first.customer,
            ledger.txs.for_customer(id).chain(iter::once(&bulk)),
        );
        ledger.commit(customer, bulk);
        let before = ledger.customer(id).cloned();

        let mut last = for_existing(id, 1, 3);
        last.amount = Money::MAX;
        let err = handle(&mut ledger, last).unwrap_err();

        assert_eq!(err, LedgerError::TotalOverflow(Money::MAX));
        assert_eq!(err.kind(), ErrorKind::BusinessRule);
        assert_eq!(ledger.customer(id).cloned(), before);
        assert_eq!(ledger.transactions().len(), 2);
        assert_eq!(
            ledger.customer(id).unwrap().total_credit,
            Money::from_major(1)
        );
    }
}
