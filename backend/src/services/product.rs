//! Product management service
//!
//! Every write path recomputes `total_cost` from the quantity and cost it is
//! about to store; the column is never accepted from the caller.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Product;
use shared::validation::{validate_price, validate_product_name, validate_product_quantity};

/// Product service for CRUD on stocked items
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub workshop_id: Uuid,
    pub product_name: String,
    pub item_no: Option<String>,
    pub product_quantity: i32,
    pub cost_per_piece: Decimal,
    pub sell_price_per_piece: Decimal,
}

/// Input for updating a product
///
/// These five fields are the complete set of caller-mutable columns; the
/// update statement binds each one by position, so no request-supplied key
/// ever reaches the SQL text.
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub product_name: Option<String>,
    pub item_no: Option<String>,
    pub product_quantity: Option<i32>,
    pub cost_per_piece: Option<Decimal>,
    pub sell_price_per_piece: Option<Decimal>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product in one of the user's workshops
    pub async fn create_product(
        &self,
        user_id: Uuid,
        input: CreateProductInput,
    ) -> AppResult<Product> {
        validate_product_name(&input.product_name).map_err(|msg| AppError::Validation {
            field: "product_name".to_string(),
            message: msg.to_string(),
        })?;
        validate_product_quantity(input.product_quantity).map_err(|msg| AppError::Validation {
            field: "product_quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_price(input.cost_per_piece).map_err(|msg| AppError::Validation {
            field: "cost_per_piece".to_string(),
            message: msg.to_string(),
        })?;
        validate_price(input.sell_price_per_piece).map_err(|msg| AppError::Validation {
            field: "sell_price_per_piece".to_string(),
            message: msg.to_string(),
        })?;

        let workshop_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM workshops WHERE id = $1 AND user_id = $2)",
        )
        .bind(input.workshop_id)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        if !workshop_exists {
            return Err(AppError::NotFound("Workshop".to_string()));
        }

        let total_cost = Decimal::from(input.product_quantity) * input.cost_per_piece;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                workshop_id, product_name, item_no, product_quantity,
                cost_per_piece, sell_price_per_piece, total_cost
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, workshop_id, product_name, item_no, product_quantity,
                      cost_per_piece, sell_price_per_piece, total_cost,
                      date_added, created_at, updated_at
            "#,
        )
        .bind(input.workshop_id)
        .bind(input.product_name.trim())
        .bind(&input.item_no)
        .bind(input.product_quantity)
        .bind(input.cost_per_piece)
        .bind(input.sell_price_per_piece)
        .bind(total_cost)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// List products in one workshop, newest first
    pub async fn get_workshop_products(
        &self,
        user_id: Uuid,
        workshop_id: Uuid,
    ) -> AppResult<Vec<Product>> {
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

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, workshop_id, product_name, item_no, product_quantity,
                   cost_per_piece, sell_price_per_piece, total_cost,
                   date_added, created_at, updated_at
            FROM products
            WHERE workshop_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// List products across all of the user's workshops
    pub async fn list_all_products(&self, user_id: Uuid) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.workshop_id, p.product_name, p.item_no, p.product_quantity,
                   p.cost_per_piece, p.sell_price_per_piece, p.total_cost,
                   p.date_added, p.created_at, p.updated_at
            FROM products p
            JOIN workshops w ON w.id = p.workshop_id
            WHERE w.user_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Get one product by id
    pub async fn get_product(&self, user_id: Uuid, product_id: Uuid) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.workshop_id, p.product_name, p.item_no, p.product_quantity,
                   p.cost_per_piece, p.sell_price_per_piece, p.total_cost,
                   p.date_added, p.created_at, p.updated_at
            FROM products p
            JOIN workshops w ON w.id = p.workshop_id
            WHERE p.id = $1 AND w.user_id = $2
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// Update a product's allow-listed fields and recompute its total cost
    pub async fn update_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let mut tx = self.db.begin().await?;

        // Lock the row so a concurrent sale cannot decrement the quantity
        // between the read and the write below.
        let existing = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.workshop_id, p.product_name, p.item_no, p.product_quantity,
                   p.cost_per_piece, p.sell_price_per_piece, p.total_cost,
                   p.date_added, p.created_at, p.updated_at
            FROM products p
            JOIN workshops w ON w.id = p.workshop_id
            WHERE p.id = $1 AND w.user_id = $2
            FOR UPDATE OF p
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let product_name = input.product_name.unwrap_or(existing.product_name);
        let item_no = input.item_no.or(existing.item_no);
        let product_quantity = input.product_quantity.unwrap_or(existing.product_quantity);
        let cost_per_piece = input.cost_per_piece.unwrap_or(existing.cost_per_piece);
        let sell_price_per_piece = input
            .sell_price_per_piece
            .unwrap_or(existing.sell_price_per_piece);

        validate_product_name(&product_name).map_err(|msg| AppError::Validation {
            field: "product_name".to_string(),
            message: msg.to_string(),
        })?;
        validate_product_quantity(product_quantity).map_err(|msg| AppError::Validation {
            field: "product_quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_price(cost_per_piece).map_err(|msg| AppError::Validation {
            field: "cost_per_piece".to_string(),
            message: msg.to_string(),
        })?;
        validate_price(sell_price_per_piece).map_err(|msg| AppError::Validation {
            field: "sell_price_per_piece".to_string(),
            message: msg.to_string(),
        })?;

        let total_cost = Decimal::from(product_quantity) * cost_per_piece;

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET product_name = $1, item_no = $2, product_quantity = $3,
                cost_per_piece = $4, sell_price_per_piece = $5, total_cost = $6,
                updated_at = NOW()
            WHERE id = $7
            RETURNING id, workshop_id, product_name, item_no, product_quantity,
                      cost_per_piece, sell_price_per_piece, total_cost,
                      date_added, created_at, updated_at
            "#,
        )
        .bind(product_name.trim())
        .bind(&item_no)
        .bind(product_quantity)
        .bind(cost_per_piece)
        .bind(sell_price_per_piece)
        .bind(total_cost)
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Delete a product that has no recorded sales
    pub async fn delete_product(&self, user_id: Uuid, product_id: Uuid) -> AppResult<()> {
        // Ownership first: another user's product must look like a missing
        // one, not a conflicting one.
        let product_exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM products p
                JOIN workshops w ON w.id = p.workshop_id
                WHERE p.id = $1 AND w.user_id = $2
            )
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let has_sales = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM sales WHERE product_id = $1)",
        )
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        if has_sales {
            return Err(AppError::Conflict {
                resource: "product".to_string(),
                message: "Product has recorded sales; delete its workshop to remove both"
                    .to_string(),
            });
        }

        let result = sqlx::query(
            r#"
            DELETE FROM products p
            USING workshops w
            WHERE p.id = $1 AND w.id = p.workshop_id AND w.user_id = $2
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }
}
