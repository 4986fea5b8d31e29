//! # REST API for Fill-ups
//!
//! Endpoints for listing, adding, editing and deleting fill-ups.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::domain::commands::entries::EntryListQuery;
use crate::domain::statistics::MonthFilter;
use crate::domain::DomainError;
use crate::io::rest::error::AppError;
use crate::io::rest::mappers::FuelEntryMapper;
use crate::AppState;
use shared::{DeleteEntryResponse, EntryListResponse, SaveFuelEntryRequest};

/// `?month=YYYY-MM`; absent or unparsable means every month
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

impl MonthQuery {
    pub fn filter(&self) -> MonthFilter {
        MonthFilter::from_query(self.month.as_deref())
    }
}

/// List processed fill-ups, most recent first
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/entries - query: {:?}", query);

    let result = state
        .fuel_service
        .list_entries(EntryListQuery {
            filter: query.filter(),
        })
        .await;

    let response = EntryListResponse {
        entries: result
            .entries
            .into_iter()
            .map(FuelEntryMapper::to_processed_dto)
            .collect(),
        month: result.filter.month().map(|m| m.to_string()),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Add a fill-up
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<SaveFuelEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/entries - request: {:?}", request);

    let command = FuelEntryMapper::to_command(request);
    match state.fuel_service.add_entry(&state.session, command).await {
        Ok(entry) => (StatusCode::CREATED, Json(FuelEntryMapper::to_raw_dto(entry))).into_response(),
        Err(e) => {
            error!("Failed to add fill-up: {:#}", e);
            AppError::from(e).into_response()
        }
    }
}

/// Replace an existing fill-up; an unknown id is a no-op
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SaveFuelEntryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/entries/{} - request: {:?}", id, request);

    let command = FuelEntryMapper::to_command(request);
    match state.fuel_service.update_entry(&state.session, &id, command).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(FuelEntryMapper::to_raw_dto(entry))).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to update fill-up {}: {:#}", id, e);
            AppError::from(e).into_response()
        }
    }
}

/// Delete a fill-up; an unknown id is a no-op
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/entries/{}", id);

    match state.fuel_service.delete_entry(&state.session, &id).await {
        Ok(true) => (StatusCode::OK, Json(DeleteEntryResponse { deleted: true })).into_response(),
        Ok(false) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete fill-up {}: {:#}", id, e);
            AppError::from(e).into_response()
        }
    }
}

/// Raw fill-up as entered, for the edit form
pub async fn get_raw_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/entries/{}/raw", id);

    match state.fuel_service.raw_entry(&id).await {
        Some(entry) => (StatusCode::OK, Json(FuelEntryMapper::to_raw_dto(entry))).into_response(),
        None => AppError::from(DomainError::EntryNotFound(id)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::error::ApiError;
    use crate::io::rest::test_support::{read_json, test_state};
    use crate::storage::csv::test_utils::TestEnvironment;
    use shared::{ProcessedFuelEntry, RawFuelEntry};

    fn request(date: &str, km: &str) -> SaveFuelEntryRequest {
        SaveFuelEntryRequest {
            date: date.to_string(),
            total_value: "150,00".to_string(),
            price_per_liter: "6.00".to_string(),
            km_end: km.to_string(),
            fuel_type: "ETANOL".to_string(),
            notes: Some("Viagem".to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_entries_for_month() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let query = MonthQuery {
            month: Some("2024-04".to_string()),
        };
        let response = list_entries(State(state), Query(query)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body: EntryListResponse = read_json(response).await;
        assert_eq!(body.month.as_deref(), Some("2024-04"));
        let ids: Vec<&str> = body.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[tokio::test]
    async fn test_unparsable_month_lists_everything() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let query = MonthQuery {
            month: Some("april".to_string()),
        };
        let body: EntryListResponse = read_json(list_entries(State(state), Query(query)).await.into_response()).await;
        assert_eq!(body.month, None);
        assert_eq!(body.entries.len(), 5);
    }

    #[tokio::test]
    async fn test_create_then_fetch_raw_entry() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let response = create_entry(State(state.clone()), Json(request("2024-06-01", "135600")))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: RawFuelEntry = read_json(response).await;
        assert_eq!(created.total_value, 150.0);
        assert_eq!(created.date, "2024-06-01");

        let response = get_raw_entry(State(state.clone()), Path(created.id.clone()))
            .await
            .into_response();
        let fetched: RawFuelEntry = read_json(response).await;
        assert_eq!(fetched, created);

        let listed: EntryListResponse =
            read_json(list_entries(State(state), Query(MonthQuery::default())).await.into_response()).await;
        let previous: &ProcessedFuelEntry = &listed.entries[1];
        assert_eq!(previous.id, "5");
        assert_eq!(previous.distance, 407);
    }

    #[tokio::test]
    async fn test_create_with_bad_date_is_bad_request() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let response = create_entry(State(state), Json(request("2024-13-45", "135600")))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_entry_is_a_no_op() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let response = update_entry(
            State(state.clone()),
            Path("missing".to_string()),
            Json(request("2024-06-01", "135600")),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.fuel_service.raw_entries().await.len(), 5);
    }

    #[tokio::test]
    async fn test_raw_entry_for_unknown_id_is_not_found() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let response = get_raw_entry(State(state), Path("missing".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: ApiError = read_json(response).await;
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "Fuel entry not found: missing");
    }

    #[tokio::test]
    async fn test_delete_known_and_unknown_entries() {
        let env = TestEnvironment::new().await.unwrap();
        let state = test_state(&env).await;

        let response = delete_entry(State(state.clone()), Path("4".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body: DeleteEntryResponse = read_json(response).await;
        assert!(body.deleted);

        let response = delete_entry(State(state), Path("4".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
