//! # REST API for Generated Analysis
//!
//! Month analysis and trip cost estimates. Generation failures are not errors
//! here: the response carries the fallback text with `generated: false`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::domain::commands::entries::EntryListQuery;
use crate::domain::entry_form::parse_whole;
use crate::domain::statistics::{MonthFilter, MonthKey};
use crate::domain::AnalysisOutcome;
use crate::io::rest::error::AppError;
use crate::AppState;
use shared::{AnalysisResponse, MonthAnalysisRequest, TripEstimateRequest};

fn to_response(outcome: AnalysisOutcome) -> AnalysisResponse {
    AnalysisResponse {
        text: outcome.text,
        generated: outcome.generated,
    }
}

/// Analyze one month of fill-ups
pub async fn analyze_month(
    State(state): State<AppState>,
    Json(request): Json<MonthAnalysisRequest>,
) -> impl IntoResponse {
    info!("POST /api/analysis/month - request: {:?}", request);

    let Some(month) = MonthKey::parse(&request.month) else {
        return AppError::BadRequest(format!("Invalid month '{}', expected YYYY-MM", request.month))
            .into_response();
    };

    let entries = state
        .fuel_service
        .list_entries(EntryListQuery {
            filter: MonthFilter::Month(month),
        })
        .await
        .entries;
    if entries.is_empty() {
        return AppError::NotFound(format!("No fill-ups in {}", month)).into_response();
    }

    let outcome = state
        .analysis_service
        .analyze_month(&entries, month.month_name())
        .await;
    (StatusCode::OK, Json(to_response(outcome))).into_response()
}

/// Estimate a trip's fuel cost from the overall average efficiency
pub async fn estimate_trip(
    State(state): State<AppState>,
    Json(request): Json<TripEstimateRequest>,
) -> impl IntoResponse {
    info!("POST /api/analysis/trip - request: {:?}", request);

    let distance_km = parse_whole(&request.distance_km);
    let average_kmpl = state.fuel_service.overall_statistics().await.average_kmpl;

    let outcome = state
        .analysis_service
        .estimate_trip(distance_km, average_kmpl)
        .await;
    (StatusCode::OK, Json(to_response(outcome))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis_service::INVALID_DISTANCE_MESSAGE;
    use crate::io::rest::test_support::{read_json, test_state, GENERATED_TEXT};
    use crate::storage::csv::test_utils::TestEnvironment;

    #[tokio::test]
    async fn test_analyze_month() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let request = MonthAnalysisRequest {
            month: "2024-05".to_string(),
        };
        let response = analyze_month(State(state), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body: AnalysisResponse = read_json(response).await;
        assert!(body.generated);
        assert_eq!(body.text, GENERATED_TEXT);
    }

    #[tokio::test]
    async fn test_analyze_empty_or_invalid_month() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let request = MonthAnalysisRequest {
            month: "2025-01".to_string(),
        };
        let response = analyze_month(State(state.clone()), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = MonthAnalysisRequest {
            month: "all".to_string(),
        };
        let response = analyze_month(State(state), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_trip_estimate_validates_distance() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        for distance in ["", "abc", "-20", "0"] {
            let request = TripEstimateRequest {
                distance_km: distance.to_string(),
            };
            let body: AnalysisResponse =
                read_json(estimate_trip(State(state.clone()), Json(request)).await.into_response()).await;
            assert_eq!(body.text, INVALID_DISTANCE_MESSAGE);
            assert!(!body.generated);
        }

        let request = TripEstimateRequest {
            distance_km: "450".to_string(),
        };
        let body: AnalysisResponse = read_json(estimate_trip(State(state), Json(request)).await.into_response()).await;
        assert!(body.generated);
    }
}
