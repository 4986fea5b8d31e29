//! # Fuel Tracker Backend
//!
//! Contains all non-UI logic for the fuel tracker: the fill-up log, per-trip
//! efficiency derivation, spending statistics and maintenance reminders.
//!
//! The backend follows the same layered architecture throughout:
//! ```text
//! UI Layer (browser frontend)
//!     ↓
//! IO Layer (REST API, text-generation client)
//!     ↓
//! Domain Layer (derivation, statistics, maintenance, services)
//!     ↓
//! Storage Layer (CSV / YAML files)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Set up the REST API router with the CORS policy for the UI origin
//! - Coordinate between domain logic and data persistence

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{AppConfig, DEFAULT_CORS_ORIGIN};
use crate::domain::models::session::Session;
use crate::domain::{AnalysisService, FuelService};
use crate::io::GeminiClient;
use crate::storage::csv::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub fuel_service: Arc<FuelService<CsvConnection>>,
    pub analysis_service: Arc<AnalysisService>,
    pub session: Session,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up data directory at {}", config.data_dir.display());
    let connection = Arc::new(CsvConnection::new(&config.data_dir)?);

    let mut session = Session::start();
    session.login();
    info!("Session started at {}", session.started_at().to_rfc3339());

    info!("Loading fuel log");
    let fuel_service = FuelService::new(connection);
    fuel_service.load(&session).await?;

    info!("Setting up analysis service with model {}", config.gemini.model);
    let generator = GeminiClient::new(&config.gemini)?;
    let analysis_service = AnalysisService::new(Arc::new(generator));

    Ok(AppState {
        fuel_service: Arc::new(fuel_service),
        analysis_service: Arc::new(analysis_service),
        session,
    })
}

fn cors_layer(cors_origin: &str) -> CorsLayer {
    let origin = cors_origin.parse::<HeaderValue>().unwrap_or_else(|_| {
        warn!("Invalid CORS origin '{}', using {}", cors_origin, DEFAULT_CORS_ORIGIN);
        HeaderValue::from_static(DEFAULT_CORS_ORIGIN)
    });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Router {
    let api_routes = Router::new()
        .route("/entries", get(io::rest::list_entries).post(io::rest::create_entry))
        .route("/entries/:id", put(io::rest::update_entry).delete(io::rest::delete_entry))
        .route("/entries/:id/raw", get(io::rest::get_raw_entry))
        .route("/stats", get(io::rest::get_stats))
        .route("/months", get(io::rest::get_months))
        .route("/months/:month/summary", get(io::rest::get_month_summary))
        .route("/mileage", get(io::rest::get_mileage))
        .route(
            "/maintenance",
            get(io::rest::get_maintenance).put(io::rest::save_maintenance),
        )
        .route("/maintenance/status", get(io::rest::get_maintenance_status))
        .route("/maintenance/reminders", get(io::rest::get_reminders))
        .route("/export/csv", get(io::rest::export_csv))
        .route("/analysis/month", post(io::rest::analyze_month))
        .route("/analysis/trip", post(io::rest::estimate_trip));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors_layer(cors_origin))
        .with_state(app_state)
}
