//! Starts the HTTP server for the ACA engine API.
//!
//! `ACA_CONFIG_DIR` names the configuration directory (default
//! `./config/aca`) and `PORT` the listening port (default 8080).

use aca_engine::api::{AppState, create_router};
use aca_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("ACA_CONFIG_DIR").unwrap_or_else(|_| "./config/aca".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config = ConfigLoader::load(&config_dir).map_err(|e| {
        tracing::error!("Failed to load configuration from {config_dir}: {e}");
        e
    })?;
    tracing::info!(
        regulation = %config.regulation().code,
        version = %config.regulation().version,
        tax_years = ?config.config().supported_years(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("ACA engine listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
