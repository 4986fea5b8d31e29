//! # REST API for Maintenance
//!
//! The last-service record, the detailed status view and the reminder banner.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::io::rest::error::AppError;
use crate::io::rest::mappers::MaintenanceMapper;
use crate::AppState;
use shared::{MaintenanceStatusResponse, SaveMaintenanceRequest};

pub async fn get_maintenance(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/maintenance");

    let data = state.fuel_service.maintenance().await;
    (StatusCode::OK, Json(MaintenanceMapper::to_dto(data))).into_response()
}

/// Replace the last-service readings
pub async fn save_maintenance(
    State(state): State<AppState>,
    Json(request): Json<SaveMaintenanceRequest>,
) -> impl IntoResponse {
    info!("PUT /api/maintenance - request: {:?}", request);

    let command = MaintenanceMapper::to_command(request);
    match state.fuel_service.save_maintenance(&state.session, command).await {
        Ok(data) => (StatusCode::OK, Json(MaintenanceMapper::to_dto(data))).into_response(),
        Err(e) => {
            error!("Failed to save maintenance record: {:#}", e);
            AppError::from(e).into_response()
        }
    }
}

/// Every recorded category, OK ones included
pub async fn get_maintenance_status(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/maintenance/status");

    let status = state.fuel_service.maintenance_status().await;
    let response = MaintenanceStatusResponse {
        current_mileage: status.current_mileage,
        has_records: status.has_records,
        items: MaintenanceMapper::to_report_dtos(status.reports),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Categories that need attention soon or are overdue
pub async fn get_reminders(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/maintenance/reminders");

    let reminders = state.fuel_service.reminders().await;
    (StatusCode::OK, Json(MaintenanceMapper::to_report_dtos(reminders))).into_response()
}
