//! Aggregator service for supplier/month invoice totals

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::types::{AggregatedGroup, AggregationKey, CanonicalRecord};

/// Aggregator for exact-decimal invoice totals
pub struct Aggregator;

impl Aggregator {
    /// Group records by (supplier, month) and sum amounts exactly.
    ///
    /// Duplicate keys are summed, never deduplicated: the source legitimately
    /// carries multiple invoices per supplier per month, and the upstream API
    /// may resend records. The BTreeMap key order (supplier id, then invoice
    /// month) is the required output order, so emission is deterministic
    /// regardless of input order.
    pub fn by_supplier_month(records: Vec<CanonicalRecord>) -> Vec<AggregatedGroup> {
        let mut totals: BTreeMap<AggregationKey, Decimal> = BTreeMap::new();

        for record in records {
            *totals.entry(record.key()).or_insert(Decimal::ZERO) += record.amount;
        }

        totals
            .into_iter()
            .map(|(key, total)| AggregatedGroup { key, total })
            .collect()
    }
}
