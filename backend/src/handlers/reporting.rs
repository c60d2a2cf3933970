//! HTTP handlers for reporting endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::reporting::{ReportFilter, ReportingService};
use crate::AppState;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub format: Option<String>, // "json" or "csv"
}

impl ReportQuery {
    /// A malformed bound is rejected rather than silently widening the range
    fn filter(&self) -> AppResult<ReportFilter> {
        Ok(ReportFilter {
            start_date: parse_date(self.start_date.as_deref(), "start_date")?,
            end_date: parse_date(self.end_date.as_deref(), "end_date")?,
        })
    }
}

fn parse_date(value: Option<&str>, param: &str) -> AppResult<Option<NaiveDate>> {
    value
        .map(|s| {
            s.parse::<NaiveDate>().map_err(|_| {
                AppError::ValidationError(format!("{} must be a YYYY-MM-DD date", param))
            })
        })
        .transpose()
}

/// Get dashboard statistics
pub async fn get_dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());
    let stats = service.get_dashboard_stats(current_user.0.user_id).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(std::slice::from_ref(&stats))?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"dashboard.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(stats).into_response())
    }
}

/// Get the per-product profit summary
pub async fn get_profit_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());
    let data = service.get_profit_summary(current_user.0.user_id).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&data)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"profit_summary.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}

/// Get the date-filtered sales report
pub async fn get_sales_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());
    let filter = query.filter()?;
    let data = service
        .get_sales_report(current_user.0.user_id, &filter)
        .await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&data)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"sales_report.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}
