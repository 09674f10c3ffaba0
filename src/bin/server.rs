//! CosmicOptic HTTP Server Binary
//!
//! This is the main entry point for the CosmicOptic REST API server.
//! It initializes the prediction service, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin cosmic-optic-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `FRONTEND_ORIGINS`: Comma-separated CORS allowlist (default: permissive)
//! - `SIMULATED_LATENCY_MS`: Artificial predict delay for demo realism (default: 0)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cosmic_optic::http::{create_router, AppState, ServerConfig};
use cosmic_optic::services::PredictionService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting CosmicOptic HTTP Server");

    let config = ServerConfig::from_env();
    let service = Arc::new(PredictionService::new());
    info!(
        samples = service.catalog().len(),
        "Prediction service initialized"
    );

    // Create application state
    let state =
        AppState::new(service).with_simulated_latency(config.simulated_latency);

    // Create router with all endpoints
    let app = create_router(state, &config.allowed_origins);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
