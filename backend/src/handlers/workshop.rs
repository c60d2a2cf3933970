//! HTTP handlers for workshop management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Product, Sale, Workshop};
use crate::services::workshop::{CreateWorkshopInput, UpdateWorkshopInput};
use crate::services::{ProductService, SaleService, WorkshopService};
use crate::AppState;

/// Create a workshop
pub async fn create_workshop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateWorkshopInput>,
) -> AppResult<Json<Workshop>> {
    let service = WorkshopService::new(state.db);
    let workshop = service
        .create_workshop(current_user.0.user_id, input)
        .await?;
    Ok(Json(workshop))
}

/// List the user's workshops
pub async fn list_workshops(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Workshop>>> {
    let service = WorkshopService::new(state.db);
    let workshops = service.list_workshops(current_user.0.user_id).await?;
    Ok(Json(workshops))
}

/// Get one workshop
pub async fn get_workshop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Workshop>> {
    let service = WorkshopService::new(state.db);
    let workshop = service
        .get_workshop(current_user.0.user_id, workshop_id)
        .await?;
    Ok(Json(workshop))
}

/// Rename a workshop
pub async fn update_workshop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(workshop_id): Path<Uuid>,
    Json(input): Json<UpdateWorkshopInput>,
) -> AppResult<Json<Workshop>> {
    let service = WorkshopService::new(state.db);
    let workshop = service
        .update_workshop(current_user.0.user_id, workshop_id, input)
        .await?;
    Ok(Json(workshop))
}

/// Delete a workshop and everything in it
pub async fn delete_workshop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = WorkshopService::new(state.db);
    service
        .delete_workshop(current_user.0.user_id, workshop_id)
        .await?;
    Ok(Json(()))
}

/// List products in a workshop
pub async fn list_workshop_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service
        .get_workshop_products(current_user.0.user_id, workshop_id)
        .await?;
    Ok(Json(products))
}

/// List sales recorded in a workshop
pub async fn list_workshop_sales(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Vec<Sale>>> {
    let service = SaleService::new(state.db);
    let sales = service
        .get_workshop_sales(current_user.0.user_id, workshop_id)
        .await?;
    Ok(Json(sales))
}
