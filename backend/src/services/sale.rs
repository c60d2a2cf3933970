//! Sale recording service
//!
//! The one multi-statement workflow in the system: validate a proposed sale
//! against current stock, snapshot prices, persist the sale, and decrement
//! the product's on-hand quantity. The insert and the decrement run inside
//! a single database transaction with the product row locked, so a sale is
//! never visible without its stock adjustment and concurrent sales against
//! the same product cannot oversell it.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Sale, SaleWithContext};
use shared::types::SaleTotals;
use shared::validation::{validate_customer_name, validate_phone, validate_price, validate_sold_quantity};

/// Sale service for recording and listing sales
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// Input for recording a sale
#[derive(Debug, Deserialize)]
pub struct RecordSaleInput {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub product_id: Uuid,
    pub sold_quantity: i32,
    pub selling_price_piece: Decimal,
}

/// Stock snapshot read under lock before the sale is applied
#[derive(Debug, sqlx::FromRow)]
struct ProductStockRow {
    workshop_id: Uuid,
    product_quantity: i32,
    cost_per_piece: Decimal,
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a sale and decrement the product's stock atomically
    pub async fn record_sale(&self, user_id: Uuid, input: RecordSaleInput) -> AppResult<Sale> {
        validate_customer_name(&input.customer_name).map_err(|msg| AppError::Validation {
            field: "customer_name".to_string(),
            message: msg.to_string(),
        })?;
        if let Some(phone) = &input.customer_phone {
            validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "customer_phone".to_string(),
                message: msg.to_string(),
            })?;
        }
        validate_sold_quantity(input.sold_quantity).map_err(|msg| AppError::Validation {
            field: "sold_quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_price(input.selling_price_piece).map_err(|msg| AppError::Validation {
            field: "selling_price_piece".to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        // Lock the product row for the rest of the transaction. The join
        // scopes the lookup to the caller's workshops; another user's
        // product is indistinguishable from a missing one.
        let product = sqlx::query_as::<_, ProductStockRow>(
            r#"
            SELECT p.workshop_id, p.product_quantity, p.cost_per_piece
            FROM products p
            JOIN workshops w ON w.id = p.workshop_id
            WHERE p.id = $1 AND w.user_id = $2
            FOR UPDATE OF p
            "#,
        )
        .bind(input.product_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if input.sold_quantity > product.product_quantity {
            return Err(AppError::InsufficientStock {
                available: product.product_quantity,
                requested: input.sold_quantity,
            });
        }

        // Snapshot the cost read under lock; later product edits must not
        // change this sale's figures.
        let totals = SaleTotals::compute(
            input.sold_quantity,
            input.selling_price_piece,
            product.cost_per_piece,
        );
        let transaction_id = Uuid::new_v4();

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                product_id, workshop_id, customer_name, customer_phone,
                sold_quantity, selling_price_piece, cost_price_piece,
                total_sale_price, total_cost, profit, sale_transaction_id, sale_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
            RETURNING id, product_id, workshop_id, customer_name, customer_phone,
                      sold_quantity, selling_price_piece, cost_price_piece,
                      total_sale_price, total_cost, profit, sale_transaction_id,
                      sale_date, created_at
            "#,
        )
        .bind(input.product_id)
        .bind(product.workshop_id)
        .bind(&input.customer_name)
        .bind(&input.customer_phone)
        .bind(input.sold_quantity)
        .bind(input.selling_price_piece)
        .bind(product.cost_per_piece)
        .bind(totals.total_sale_price)
        .bind(totals.total_cost)
        .bind(totals.profit)
        .bind(transaction_id)
        .fetch_one(&mut *tx)
        .await?;

        // Conditional decrement: the quantity guard re-checks stock at write
        // time, so a zero row count means the check was lost to a concurrent
        // writer and the whole transaction rolls back.
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET product_quantity = product_quantity - $1,
                total_cost = (product_quantity - $1) * cost_per_piece,
                updated_at = NOW()
            WHERE id = $2 AND product_quantity >= $1
            "#,
        )
        .bind(input.sold_quantity)
        .bind(input.product_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::InsufficientStock {
                available: product.product_quantity,
                requested: input.sold_quantity,
            });
        }

        tx.commit().await?;

        Ok(sale)
    }

    /// Get sales for one workshop, newest first
    pub async fn get_workshop_sales(
        &self,
        user_id: Uuid,
        workshop_id: Uuid,
    ) -> AppResult<Vec<Sale>> {
        let workshop_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM workshops WHERE id = $1 AND user_id = $2)",
        )
        .bind(workshop_id)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        if !workshop_exists {
            return Err(AppError::NotFound("Workshop".to_string()));
        }

        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, workshop_id, customer_name, customer_phone,
                   sold_quantity, selling_price_piece, cost_price_piece,
                   total_sale_price, total_cost, profit, sale_transaction_id,
                   sale_date, created_at
            FROM sales
            WHERE workshop_id = $1
            ORDER BY sale_date DESC
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// List all sales across the user's workshops with product and workshop
    /// context for the dashboard tables
    pub async fn list_all_sales(&self, user_id: Uuid) -> AppResult<Vec<SaleWithContext>> {
        let sales = sqlx::query_as::<_, SaleWithContext>(
            r#"
            SELECT s.id, s.product_id, s.workshop_id, s.customer_name, s.customer_phone,
                   s.sold_quantity, s.selling_price_piece, s.cost_price_piece,
                   s.total_sale_price, s.total_cost, s.profit, s.sale_transaction_id,
                   s.sale_date, s.created_at,
                   p.product_name, p.item_no, w.workshop_name
            FROM sales s
            JOIN workshops w ON w.id = s.workshop_id
            JOIN products p ON p.id = s.product_id
            WHERE w.user_id = $1
            ORDER BY s.sale_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }
}
