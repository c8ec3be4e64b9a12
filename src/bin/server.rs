//! Nowcast HTTP Server Binary
//!
//! This is the main entry point for the forecast serving REST API.
//! It loads the inference backend, sets up the HTTP router, and starts
//! serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the simulated backend (default)
//! cargo run --bin nowcast-server
//!
//! # Run against a TorchScript artifact
//! MODEL_PATH=/models/final_model.pt \
//!   cargo run --bin nowcast-server --no-default-features \
//!   --features "torch-backend,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `MODEL_PATH`: TorchScript artifact path (torch-backend only)
//! - `SEQ_LEN`, `HORIZONS`, `PATCH_HEIGHT`, `PATCH_WIDTH`, `CHANNELS`:
//!   tensor shape contract of the served model version
//! - `BASE_DATE`, `SAMPLE_INDEX`: sample window reference point and fallback
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use nowcast_rust::config::ServiceConfig;
use nowcast_rust::http::{create_router, AppState};
use nowcast_rust::inference;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Nowcast HTTP Server");

    let config = ServiceConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Load the backend once; on failure the server still starts and answers
    // every prediction request with the unavailable error.
    let backend = match inference::load_backend(&config) {
        Ok(backend) => {
            info!("Inference backend loaded successfully");
            Some(backend)
        }
        Err(e) => {
            error!("Failed to load inference backend: {e}");
            None
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Create application state and router
    let state = AppState::new(backend, config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
