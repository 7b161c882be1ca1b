//! location-relay server entry point.
//!
//! Starts the Axum HTTP server with the page, health and WebSocket
//! endpoints.

use tracing_subscriber::EnvFilter;

use location_relay::api;
use location_relay::app_state::AppState;
use location_relay::config::{LogFormat, RelayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = RelayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        page = %config.client_page_path.display(),
        outbound_buffer = config.outbound_buffer,
        "starting location-relay"
    );

    // Build application state and router
    let state = AppState::new(config.client_page_path.clone(), config.outbound_buffer);
    let app = api::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
