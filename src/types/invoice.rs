//! Invoice types for the fetch-normalize-aggregate pipeline

use rust_decimal::Decimal;

/// One invoice row after schema normalization, ready for aggregation.
///
/// `invoice_month` is always 7 characters, zero-padded (`YYYY-MM`), and
/// `amount` carries the exact decimal value of the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub supplier_id: String,
    pub invoice_month: String,
    pub amount: Decimal,
}

/// Grouping identity for aggregation.
///
/// The derived `Ord` (supplier id lexicographic, then invoice month
/// lexicographic, which is chronological for `YYYY-MM`) is the required
/// output order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregationKey {
    pub supplier_id: String,
    pub invoice_month: String,
}

impl CanonicalRecord {
    pub fn key(&self) -> AggregationKey {
        AggregationKey {
            supplier_id: self.supplier_id.clone(),
            invoice_month: self.invoice_month.clone(),
        }
    }
}

/// One aggregated (supplier, month) group with its exact running total.
///
/// The total stays unrounded until formatting time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedGroup {
    pub key: AggregationKey,
    pub total: Decimal,
}
