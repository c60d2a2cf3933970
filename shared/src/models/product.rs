//! Product models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked item belonging to one workshop
///
/// `total_cost` is derived: always `product_quantity * cost_per_piece`,
/// recomputed whenever either input changes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub product_name: String,
    /// Optional external item code
    pub item_no: Option<String>,
    pub product_quantity: i32,
    pub cost_per_piece: Decimal,
    pub sell_price_per_piece: Decimal,
    pub total_cost: Decimal,
    pub date_added: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
