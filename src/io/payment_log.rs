use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use crate::{
    common::error::AppError,
    domain::payment::{PaymentRecord, PaymentRecordSink},
};

#[derive(serde::Serialize)]
struct PaymentRow<'a> {
    credit_id: u32,
    shop: &'a str,
    amount: String,
    mode: &'static str,
    note: &'a str,
    date: String,
}

/// Append-only CSV log of payment records:
/// `credit_id,shop,amount,mode,note,date`, dates in RFC 3339.
///
/// Each record is flushed as soon as it is appended.
pub struct CsvPaymentLog<W: Write> {
    wtr: csv::Writer<W>,
}

impl CsvPaymentLog<File> {
    /// Opens `path` for appending, creating it if needed. The header is only
    /// written when the file starts out empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        Ok(Self::from_writer(file, is_empty))
    }
}

impl<W: Write> CsvPaymentLog<W> {
    pub fn from_writer(writer: W, write_header: bool) -> Self {
        let wtr = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(writer);
        Self { wtr }
    }

    pub fn into_inner(self) -> Result<W, AppError> {
        self.wtr
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))
    }
}

impl<W: Write> PaymentRecordSink for CsvPaymentLog<W> {
    fn append_record(&mut self, record: &PaymentRecord) -> Result<(), AppError> {
        self.wtr.serialize(PaymentRow {
            credit_id: record.credit_id,
            shop: &record.shop,
            amount: record.amount.to_string_2dp(),
            mode: record.mode.as_str(),
            note: &record.note,
            date: record.date.to_rfc3339(),
        })?;
        self.wtr.flush()?;
        Ok(())
    }
}
