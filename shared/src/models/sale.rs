//! Sale models
//!
//! Sales are an append-only log per product. The per-piece prices are
//! snapshots captured when the sale is recorded, so later product edits
//! never change historical profit figures.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable record of units sold from one product
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub product_id: Uuid,
    pub workshop_id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub sold_quantity: i32,
    pub selling_price_piece: Decimal,
    /// Product cost per unit at the time of sale
    pub cost_price_piece: Decimal,
    pub total_sale_price: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
    pub sale_transaction_id: Uuid,
    pub sale_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A sale row joined with its product and workshop context, as returned by
/// the cross-workshop listings and reports
///
/// Kept flat rather than nesting [`Sale`] so the rows serialize directly to
/// CSV for report downloads.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleWithContext {
    pub id: Uuid,
    pub product_id: Uuid,
    pub workshop_id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub sold_quantity: i32,
    pub selling_price_piece: Decimal,
    pub cost_price_piece: Decimal,
    pub total_sale_price: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
    pub sale_transaction_id: Uuid,
    pub sale_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub product_name: String,
    pub item_no: Option<String>,
    pub workshop_name: String,
}
