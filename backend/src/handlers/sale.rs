//! HTTP handlers for sale endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Sale, SaleWithContext};
use crate::services::sale::RecordSaleInput;
use crate::services::SaleService;
use crate::AppState;

/// Record a sale against a product's stock
pub async fn record_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let service = SaleService::new(state.db);
    let sale = service.record_sale(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// List all sales across the user's workshops
pub async fn list_all_sales(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SaleWithContext>>> {
    let service = SaleService::new(state.db);
    let sales = service.list_all_sales(current_user.0.user_id).await?;
    Ok(Json(sales))
}
