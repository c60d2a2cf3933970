//! Reporting service for dashboard statistics and data export
//! Provides profit summaries, date-filtered sales reports, and CSV export

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::SaleWithContext;
use shared::types::DateRange;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Headline numbers for the dashboard cards
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_sales: i64,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    /// Current valuation of on-hand stock at cost
    pub inventory_value: Decimal,
}

/// Per-product profit summary row
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ProfitSummary {
    pub product_id: Uuid,
    pub item_no: Option<String>,
    pub product_name: String,
    pub sell_price_per_piece: Decimal,
    pub remaining_stock: i32,
    pub workshop_id: Uuid,
    pub workshop_name: String,
    pub total_quantity_sold: i64,
    pub total_sales_amount: Decimal,
    pub total_cost_amount: Decimal,
    pub total_profit: Decimal,
}

/// Report filter parameters
#[derive(Debug, Deserialize)]
pub struct ReportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportFilter {
    /// Resolve the filter into concrete inclusive bounds
    pub fn date_range(&self) -> DateRange {
        let unbounded = DateRange::unbounded();
        DateRange {
            start: self.start_date.unwrap_or(unbounded.start),
            end: self.end_date.unwrap_or(unbounded.end),
        }
    }
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get dashboard statistics for the user
    ///
    /// Each figure is its own aggregate subquery; joining products and sales
    /// in one pass would multiply rows and overstate the sums.
    pub async fn get_dashboard_stats(&self, user_id: Uuid) -> AppResult<DashboardStats> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products p
                 JOIN workshops w ON w.id = p.workshop_id
                 WHERE w.user_id = $1) AS total_products,
                (SELECT COUNT(*) FROM sales s
                 JOIN workshops w ON w.id = s.workshop_id
                 WHERE w.user_id = $1) AS total_sales,
                (SELECT COALESCE(SUM(s.total_sale_price), 0) FROM sales s
                 JOIN workshops w ON w.id = s.workshop_id
                 WHERE w.user_id = $1) AS total_revenue,
                (SELECT COALESCE(SUM(s.profit), 0) FROM sales s
                 JOIN workshops w ON w.id = s.workshop_id
                 WHERE w.user_id = $1) AS total_profit,
                (SELECT COALESCE(SUM(p.total_cost), 0) FROM products p
                 JOIN workshops w ON w.id = p.workshop_id
                 WHERE w.user_id = $1) AS inventory_value
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(stats)
    }

    /// Get the per-product profit summary, most profitable first
    pub async fn get_profit_summary(&self, user_id: Uuid) -> AppResult<Vec<ProfitSummary>> {
        let summary = sqlx::query_as::<_, ProfitSummary>(
            r#"
            SELECT ps.product_id, ps.item_no, ps.product_name, ps.sell_price_per_piece,
                   ps.remaining_stock, ps.workshop_id, ps.workshop_name,
                   ps.total_quantity_sold, ps.total_sales_amount, ps.total_cost_amount,
                   ps.total_profit
            FROM profit_summary ps
            JOIN workshops w ON w.id = ps.workshop_id
            WHERE w.user_id = $1
            ORDER BY ps.total_profit DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(summary)
    }

    /// Get sales within the filter's date range, newest first
    pub async fn get_sales_report(
        &self,
        user_id: Uuid,
        filter: &ReportFilter,
    ) -> AppResult<Vec<SaleWithContext>> {
        let range = filter.date_range();

        let sales = sqlx::query_as::<_, SaleWithContext>(
            r#"
            SELECT s.id, s.product_id, s.workshop_id, s.customer_name, s.customer_phone,
                   s.sold_quantity, s.selling_price_piece, s.cost_price_piece,
                   s.total_sale_price, s.total_cost, s.profit, s.sale_transaction_id,
                   s.sale_date, s.created_at,
                   p.product_name, p.item_no, w.workshop_name
            FROM sales s
            JOIN products p ON p.id = s.product_id
            JOIN workshops w ON w.id = s.workshop_id
            WHERE w.user_id = $1
              AND s.sale_date >= $2::date
              AND s.sale_date < ($3::date + INTERVAL '1 day')
            ORDER BY s.sale_date DESC
            "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// Render report rows as CSV for download
    pub fn export_to_csv<T: Serialize>(rows: &[T]) -> AppResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV buffer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("CSV output was not UTF-8: {}", e)))
    }
}
