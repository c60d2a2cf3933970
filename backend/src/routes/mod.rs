//! Route definitions for the Workshop Sales Management Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - user synchronization
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes - workshop management
        .nest("/workshops", workshop_routes(state.clone()))
        // Protected routes - product management
        .nest("/products", product_routes(state.clone()))
        // Protected routes - sale recording and listing
        .nest("/sales", sale_routes(state.clone()))
        // Protected routes - reporting
        .nest("/reports", report_routes(state))
}

/// User synchronization routes (protected)
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/sync", post(handlers::sync_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Workshop management routes (protected)
fn workshop_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_workshops).post(handlers::create_workshop),
        )
        .route(
            "/:workshop_id",
            get(handlers::get_workshop)
                .put(handlers::update_workshop)
                .delete(handlers::delete_workshop),
        )
        .route("/:workshop_id/products", get(handlers::list_workshop_products))
        .route("/:workshop_id/sales", get(handlers::list_workshop_sales))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Product management routes (protected)
fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_all_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Sale routes (protected)
fn sale_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_all_sales).post(handlers::record_sale))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Reporting routes (protected)
fn report_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/profit-summary", get(handlers::get_profit_summary))
        .route("/sales", get(handlers::get_sales_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
