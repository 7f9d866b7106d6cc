use std::{io::Read, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    common::{
        intent::{CustomerRef, LedgerIntent, NewCredit, Settlement},
        money::Money,
    },
    domain::payment::PaymentMode,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(serde::Deserialize)]
/// One row of the intent CSV. Columns that do not apply to a row's type are
/// left blank.
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    customer: Option<u32>,
    name: Option<String>,
    phone: Option<String>,
    item: Option<String>,
    tx: Option<u32>,
    amount: Option<String>,
    mode: Option<String>,
    note: Option<String>,
    date: Option<String>,
}

/// Reads mutation intents from a CSV reader.
///
/// Headers: `type,customer,name,phone,item,tx,amount,mode,note,date`.
/// `credit` rows name an existing `customer` id or a new `name` and `phone`;
/// `payment` rows name the `tx` being settled. Only malformed rows are errors
/// here. Business validation (blank item, zero amount, missing mode) is left
/// to the ledger so it can be reported per field.
///
/// # Examples
///
/// ```
/// use credit_ledger::io::reader::read_intents;
/// use credit_ledger::common::intent::LedgerIntent;
/// use csv::ReaderBuilder;
///
/// let data = "type,customer,name,phone,item,tx,amount,mode,note,date\n\
/// credit,,A,111,Rice,,500,,,2024-03-01\n\
/// payment,,,,,1,500,cash,,\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let intents: Vec<_> = read_intents(&mut rdr).collect();
///
/// assert!(matches!(intents[0], Ok(LedgerIntent::AddCredit(_))));
/// assert!(matches!(intents[1], Ok(LedgerIntent::SettlePayment(_))));
/// ```
pub fn read_intents<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<LedgerIntent, String>> + '_ {
    rdr.deserialize::<CsvRow>().enumerate().map(|(i, res)| {
        // header is line 1
        let line = i + 2;
        let row = res.map_err(|e| e.to_string())?;
        let kind = row.kind.trim().to_ascii_lowercase();

        match kind.as_str() {
            "credit" => parse_credit(row, line).map(LedgerIntent::AddCredit),
            "payment" => parse_payment(row, line).map(LedgerIntent::SettlePayment),
            other => Err(format!("unknown intent type: {other} on line {line}")),
        }
    })
}

fn parse_credit(row: CsvRow, line: usize) -> Result<NewCredit, String> {
    let customer = match row.customer {
        Some(id) => CustomerRef::Existing(id),
        None => CustomerRef::New {
            name: row.name.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
        },
    };

    let amount = parse_amount(row.amount, "credit", line)?;

    let date = row
        .date
        .ok_or_else(|| format!("credit missing date on line {line}"))?;
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|e| format!("invalid date {date:?} on line {line}: {e}"))?;

    Ok(NewCredit {
        customer,
        item: row.item.unwrap_or_default(),
        amount,
        date,
    })
}

fn parse_payment(row: CsvRow, line: usize) -> Result<Settlement, String> {
    let transaction_id = row
        .tx
        .ok_or_else(|| format!("payment missing tx on line {line}"))?;
    let amount = parse_amount(row.amount, "payment", line)?;

    let mode = row
        .mode
        .map(|m| PaymentMode::from_str(&m).map_err(|e| format!("{e} on line {line}")))
        .transpose()?;

    let paid_at = row
        .date
        .map(|d| parse_timestamp(&d).map_err(|e| format!("{e} on line {line}")))
        .transpose()?;

    Ok(Settlement {
        transaction_id,
        mode,
        amount,
        note: row.note,
        paid_at,
    })
}

fn parse_amount(raw: Option<String>, kind: &str, line: usize) -> Result<Money, String> {
    let raw = raw.ok_or_else(|| format!("{kind} missing amount on line {line}"))?;
    Money::from_str(&raw).map_err(|e| format!("invalid amount {raw:?} on line {line}: {e}"))
}

/// Accepts RFC 3339 timestamps or plain dates (taken as midnight UTC).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid payment date {raw:?}"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const HEADER: &str = "type,customer,name,phone,item,tx,amount,mode,note,date\n";

    // Helper: parse CSV input into collected intents for assertions.
    fn collect_intents(rows: &str) -> Vec<Result<LedgerIntent, String>> {
        let input = format!("{HEADER}{rows}");
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input.as_bytes());
        read_intents(&mut reader).collect()
    }

    #[test]
    fn parses_credit_for_new_and_existing_customers() {
        let intents = collect_intents(
            "credit,,A,111,X,,500,,,2024-03-01\n\
credit,1,,,Y,,300.50,,,2024-03-02\n",
        );

        assert_eq!(
            intents[0],
            Ok(LedgerIntent::AddCredit(NewCredit {
                customer: CustomerRef::New {
                    name: "A".into(),
                    phone: "111".into(),
                },
                item: "X".into(),
                amount: Money::from_major(500),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            }))
        );

        match &intents[1] {
            Ok(LedgerIntent::AddCredit(credit)) => {
                assert_eq!(credit.customer, CustomerRef::Existing(1));
                assert_eq!(credit.amount, Money::from_minor(30_050));
            }
            other => panic!("unexpected credit intent: {other:?}"),
        }
    }

    #[test]
    fn parses_payment_with_optional_columns() {
        let intents = collect_intents(
            "payment,,,,,4,250,UPI,ref 9,2024-03-05T09:15:00+05:30\n\
payment,,,,,5,10,,,\n",
        );

        assert_eq!(
            intents[0],
            Ok(LedgerIntent::SettlePayment(Settlement {
                transaction_id: 4,
                mode: Some(PaymentMode::Upi),
                amount: Money::from_major(250),
                note: Some("ref 9".into()),
                paid_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 3, 45, 0).unwrap()),
            }))
        );

        match &intents[1] {
            Ok(LedgerIntent::SettlePayment(s)) => {
                assert_eq!(s.mode, None);
                assert_eq!(s.note, None);
                assert_eq!(s.paid_at, None);
            }
            other => panic!("unexpected payment intent: {other:?}"),
        }
    }

    #[test]
    fn plain_payment_date_is_midnight_utc() {
        let ts = parse_timestamp("2024-03-05").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn reports_missing_amount_with_line() {
        let intents = collect_intents("credit,,A,111,X,,,,,2024-03-01\n");
        assert_eq!(
            intents[0],
            Err("credit missing amount on line 2".to_string())
        );
    }

    #[test]
    fn reports_unknown_mode_and_type() {
        let intents = collect_intents("payment,,,,,1,5,barter,,\nrefund,,,,,1,5,,,\n");

        let err = intents[0].clone().unwrap_err();
        assert!(err.contains("unknown payment mode: barter"), "{err}");
        assert!(err.ends_with("on line 2"), "{err}");
        assert_eq!(
            intents[1],
            Err("unknown intent type: refund on line 3".to_string())
        );
    }

    #[test]
    fn reports_missing_tx_and_bad_date() {
        let intents = collect_intents("payment,,,,,,5,cash,,\ncredit,,A,1,X,,5,,,03/01/2024\n");

        assert_eq!(
            intents[0],
            Err("payment missing tx on line 2".to_string())
        );
        assert!(intents[1].clone().unwrap_err().starts_with("invalid date"));
    }
}
