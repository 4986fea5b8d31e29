//! # REST API for Statistics
//!
//! Dashboard cards, the month selector, month summaries and the mileage hint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use log::info;

use crate::domain::statistics::MonthKey;
use crate::io::rest::entry_apis::MonthQuery;
use crate::io::rest::error::AppError;
use crate::io::rest::mappers::{MaintenanceMapper, StatsMapper};
use crate::AppState;
use shared::{AvailableMonthsResponse, DashboardResponse, MileageResponse};

/// Statistics cards and maintenance reminders, optionally for one month
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/stats - query: {:?}", query);

    let dashboard = state.fuel_service.dashboard(query.filter()).await;
    let response = DashboardResponse {
        current_mileage: dashboard.current_mileage,
        month: dashboard.filter.month().map(|m| m.to_string()),
        statistics: StatsMapper::to_dto(dashboard.statistics),
        reminders: MaintenanceMapper::to_report_dtos(dashboard.reminders),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Month keys for the selector, most recent first
pub async fn get_months(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/months");

    let today = Local::now().date_naive();
    let months = state.fuel_service.available_months(today).await;
    let response = AvailableMonthsResponse {
        months: months.iter().map(|m| m.to_string()).collect(),
        current_month: MonthKey::of_date(today).to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Summary card for one month
pub async fn get_month_summary(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/months/{}/summary", month);

    let Some(key) = MonthKey::parse(&month) else {
        return AppError::BadRequest(format!("Invalid month '{}', expected YYYY-MM", month)).into_response();
    };

    match state.fuel_service.month_summary(key).await {
        Some(summary) => (StatusCode::OK, Json(StatsMapper::to_summary_dto(summary))).into_response(),
        None => AppError::NotFound(format!("No fill-ups in {}", key)).into_response(),
    }
}

/// Current odometer reading
pub async fn get_mileage(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/mileage");

    let response = MileageResponse {
        current_mileage: state.fuel_service.last_known_mileage().await,
    };
    (StatusCode::OK, Json(response)).into_response()
}
