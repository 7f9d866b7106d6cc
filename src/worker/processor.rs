use tracing::debug;

use crate::{
    common::{error::AppError, intent::LedgerIntent},
    domain::{
        ledger::{CreditSnapshot, Ledger, SettlementSnapshot},
        payment::{PaymentRecord, PaymentRecordSink},
    },
    worker::handlers::{add_credit, settle_payment},
};

/// What an accepted intent produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Credit(CreditSnapshot),
    Settlement(SettlementSnapshot),
}

/// Routes intents to their handler and persists every accepted payment.
///
/// The ledger itself does no I/O; writing the payment record is done here,
/// after the ledger has accepted the settlement, so a rejected intent never
/// reaches the sink.
#[derive(Debug)]
pub struct Processor<S> {
    shop: String,
    sink: S,
}

impl<S: PaymentRecordSink> Processor<S> {
    pub fn new(shop: impl Into<String>, sink: S) -> Self {
        Self {
            shop: shop.into(),
            sink,
        }
    }

    pub fn process(
        &mut self,
        ledger: &mut Ledger,
        intent: LedgerIntent,
    ) -> Result<Outcome, AppError> {
        match intent {
            LedgerIntent::AddCredit(input) => {
                let snapshot = add_credit::handle(ledger, input)?;
                Ok(Outcome::Credit(snapshot))
            }
            LedgerIntent::SettlePayment(input) => {
                let snapshot = settle_payment::handle(ledger, input)?;
                let record = PaymentRecord::from_payment(&snapshot.payment, &self.shop);
                self.sink.append_record(&record)?;
                debug!(credit_id = record.credit_id, shop = %record.shop, "payment record appended");
                Ok(Outcome::Settlement(snapshot))
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
