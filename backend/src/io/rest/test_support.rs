//! Shared fixtures for handler tests.

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::models::session::Session;
use crate::domain::{AnalysisService, FuelService, GenerationError, TextGenerator};
use crate::storage::csv::test_utils::TestEnvironment;
use crate::AppState;

pub const GENERATED_TEXT: &str = "<p><strong>Resumo</strong> do mês</p>";

/// Answers every prompt with [`GENERATED_TEXT`]
pub struct CannedGenerator;

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _: &str, _: &str) -> Result<String, GenerationError> {
        Ok(GENERATED_TEXT.to_string())
    }
}

/// App state over the test directory, loaded with the seed dataset
pub async fn test_state(env: &TestEnvironment) -> AppState {
    let session = Session::active();
    let fuel_service = FuelService::new(Arc::new(env.connection.clone()));
    fuel_service.load(&session).await.unwrap();

    AppState {
        fuel_service: Arc::new(fuel_service),
        analysis_service: Arc::new(AnalysisService::new(Arc::new(CannedGenerator))),
        session,
    }
}

pub async fn read_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    serde_json::from_str(&read_text(response).await).unwrap()
}
