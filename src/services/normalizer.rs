//! CSV payload normalization
//!
//! Converts raw delimited text into canonical invoice records: resolves
//! column aliases once per payload, reparses source dates into a `YYYY-MM`
//! key, and coerces amounts to exact decimals. Rows that fail individually
//! are logged, counted, and skipped; schema-level problems abort the batch.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::types::{CanonicalRecord, InvsumError, Result};

/// Recognized column aliases per logical field, in priority order.
const SUPPLIER_COLUMNS: &[&str] = &["supplier_id"];
const DATE_COLUMNS: &[&str] = &["invoice_date"];
const AMOUNT_COLUMNS: &[&str] = &["gross_amount", "amount"];

/// Source date representation: month-day-2digit-year
const SOURCE_DATE_FORMAT: &str = "%m-%d-%y";

/// One parsed CSV line, column name to raw value
type RawRow = HashMap<String, String>;

/// Normalization output: surviving records plus the rejected-row count.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub records: Vec<CanonicalRecord>,
    pub rejected: usize,
}

/// Actual column names resolved once per payload and applied to every row.
#[derive(Debug, PartialEq, Eq)]
struct ColumnMap {
    supplier: String,
    date: String,
    amount: String,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<ColumnMap> {
    let find = |aliases: &[&str]| {
        aliases
            .iter()
            .find(|alias| headers.iter().any(|h| h == **alias))
            .map(|alias| alias.to_string())
    };
    let supplier = find(SUPPLIER_COLUMNS);
    let date = find(DATE_COLUMNS);
    let amount = find(AMOUNT_COLUMNS);

    match (supplier, date, amount) {
        (Some(supplier), Some(date), Some(amount)) => Ok(ColumnMap {
            supplier,
            date,
            amount,
        }),
        (supplier, date, amount) => {
            let mut missing = Vec::new();
            if supplier.is_none() {
                missing.push("supplier_id");
            }
            if date.is_none() {
                missing.push("invoice_date");
            }
            if amount.is_none() {
                missing.push("gross_amount/amount");
            }
            Err(InvsumError::MissingColumn(missing.join(", ")))
        }
    }
}

/// Normalize a raw CSV payload into canonical records.
///
/// A payload with a valid header and zero rows is not an error; a non-empty
/// payload whose every row is rejected is.
pub fn normalize(payload: &str) -> Result<NormalizedBatch> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(payload.as_bytes());
    let columns = resolve_columns(reader.headers()?)?;

    let mut batch = NormalizedBatch::default();
    let mut total = 0usize;
    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        total += 1;
        match row {
            Ok(row) => match canonicalize(&row, &columns) {
                Ok(record) => batch.records.push(record),
                Err(reason) => {
                    warn!(row = index + 1, %reason, "rejecting row");
                    batch.rejected += 1;
                }
            },
            Err(e) => {
                warn!(row = index + 1, error = %e, "rejecting malformed row");
                batch.rejected += 1;
            }
        }
    }

    if total > 0 && batch.records.is_empty() {
        return Err(InvsumError::AllRowsRejected(total));
    }
    debug!(
        rows = total,
        records = batch.records.len(),
        rejected = batch.rejected,
        "normalized payload"
    );
    Ok(batch)
}

fn canonicalize(row: &RawRow, columns: &ColumnMap) -> std::result::Result<CanonicalRecord, String> {
    let supplier_id = row
        .get(&columns.supplier)
        .filter(|v| !v.is_empty())
        .ok_or("missing supplier id")?
        .clone();

    let raw_date = row.get(&columns.date).ok_or("missing invoice date")?;
    let date = NaiveDate::parse_from_str(raw_date.trim(), SOURCE_DATE_FORMAT)
        .map_err(|e| format!("unparsable invoice date {raw_date:?}: {e}"))?;

    let raw_amount = row.get(&columns.amount).ok_or("missing amount")?;
    let amount = Decimal::from_str(raw_amount.trim())
        .map_err(|e| format!("unparsable amount {raw_amount:?}: {e}"))?;

    Ok(CanonicalRecord {
        supplier_id,
        invoice_month: date.format("%Y-%m").to_string(),
        amount,
    })
}
