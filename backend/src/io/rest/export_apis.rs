//! # REST API for Data Export
//!
//! Download of the fill-up log as a CSV file.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use log::{error, info};

use crate::io::rest::error::AppError;
use crate::AppState;

/// Export every fill-up as a CSV attachment
pub async fn export_csv(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export/csv");

    match state.fuel_service.export_csv().await {
        Ok(payload) => {
            info!("✅ EXPORT: sending {} fill-ups as {}", payload.entry_count, payload.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", payload.file_name),
                    ),
                ],
                payload.content,
            )
                .into_response()
        }
        Err(e) => {
            error!("❌ EXPORT: {}", e);
            AppError::from(e).into_response()
        }
    }
}
