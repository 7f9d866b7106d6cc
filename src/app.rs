use std::{
    fs::File,
    io::{stdout, BufWriter, Read},
};

use tracing::{info, warn};

use crate::{
    common::error::AppError,
    config::Settings,
    domain::{
        ledger::Ledger,
        payment::{PaymentRecord, PaymentRecordSink},
    },
    io::{payment_log::CsvPaymentLog, reader, writer},
    worker::processor::Processor,
};

/// Counts of intents applied by [`apply_intents`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub accepted: usize,
    pub rejected: usize,
}

pub fn run<I, S>(args: I, settings: &Settings) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 2 {
        return Err(AppError::MissingArg);
    }
    let input_path = &args[1];
    let file = File::open(input_path)?;

    let sink: Box<dyn PaymentRecordSink> = match &settings.payments_out {
        Some(path) => Box::new(CsvPaymentLog::open(path)?),
        None => Box::new(Vec::<PaymentRecord>::new()),
    };

    let mut ledger = Ledger::with_policy(settings.settlement);
    let mut processor = Processor::new(settings.shop.as_str(), sink);

    let report = apply_intents(file, &mut ledger, &mut processor)?;
    let summary = ledger.summary();
    info!(
        accepted = report.accepted,
        rejected = report.rejected,
        customers = summary.customers,
        pending_customers = summary.pending_customers,
        outstanding = %summary.outstanding,
        collected = %summary.collected,
        "intents applied"
    );

    if let Some(path) = &settings.transactions_out {
        writer::write_transactions(BufWriter::new(File::create(path)?), ledger.transactions().iter())?;
    }

    // The customer snapshot goes to stdout
    let stdout = stdout();
    writer::write_customers(BufWriter::new(stdout.lock()), ledger.customers().iter())?;

    Ok(())
}

/// Applies every intent in `input` to `ledger`, in order.
///
/// A malformed row or a failing payment sink aborts the run. Intents the
/// ledger refuses are logged and skipped.
pub fn apply_intents<R, S>(
    input: R,
    ledger: &mut Ledger,
    processor: &mut Processor<S>,
) -> Result<RunReport, AppError>
where
    R: Read,
    S: PaymentRecordSink,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let mut report = RunReport::default();
    for intent in reader::read_intents(&mut reader) {
        let intent = intent.map_err(AppError::Parse)?;
        match processor.process(ledger, intent) {
            Ok(_) => report.accepted += 1,
            Err(AppError::Ledger(err)) => {
                warn!(kind = ?err.kind(), error = %err, "intent rejected");
                report.rejected += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}
