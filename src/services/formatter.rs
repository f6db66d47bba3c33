//! Output rendering for aggregated invoice groups
//!
//! The only place amounts are rounded. Totals stay exact through
//! aggregation and are rounded to two decimal places here, once, using
//! round-half-away-from-zero (so `150.005` renders as `150.01` and
//! `-150.005` as `-150.01`).

use rust_decimal::RoundingStrategy;

use crate::types::AggregatedGroup;

/// Render groups as `supplier_id,invoice_month,amount` lines.
pub fn render(groups: &[AggregatedGroup]) -> Vec<String> {
    groups
        .iter()
        .map(|group| {
            let amount = group
                .total
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{},{},{:.2}", group.key.supplier_id, group.key.invoice_month, amount)
        })
        .collect()
}
