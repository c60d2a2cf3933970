//! Common types used across the platform

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived money figures for a sale
///
/// Computed once when the sale is recorded and stored alongside the snapshot
/// prices; never edited independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTotals {
    pub total_sale_price: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
}

impl SaleTotals {
    /// Compute totals from a quantity and the per-piece price snapshots
    pub fn compute(
        sold_quantity: i32,
        selling_price_piece: Decimal,
        cost_price_piece: Decimal,
    ) -> Self {
        let quantity = Decimal::from(sold_quantity);
        let total_sale_price = quantity * selling_price_piece;
        let total_cost = quantity * cost_price_piece;
        Self {
            total_sale_price,
            total_cost,
            profit: total_sale_price - total_cost,
        }
    }
}

/// Inclusive date range for report queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Widest range accepted by the reporting queries; used when a filter
    /// leaves one or both bounds unset
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2100, 12, 31).expect("valid date"),
        }
    }
}
