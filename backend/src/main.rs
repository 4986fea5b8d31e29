use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fuel_tracker_backend::config::AppConfig;
use fuel_tracker_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // RUST_LOG overrides the default level; log records are bridged too
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.cors_origin);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
