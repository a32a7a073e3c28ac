//! NW Native Plant Explorer HTTP Server Binary
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin plant-server
//!
//! # With a config file and a vision model key
//! PLANT_CONFIG=plants.toml VISION_API_KEY=... cargo run --bin plant-server
//! ```
//!
//! # Environment Variables
//!
//! - `PLANT_CONFIG`: Path to a TOML config file (optional)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `INATURALIST_API_BASE`: Observations API base URL
//! - `INATURALIST_TIMEOUT_SECS`: Per-call timeout (default: 30)
//! - `VISION_API_URL`, `VISION_MODEL`, `VISION_API_KEY`: Vision model endpoint
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use nw_plant_explorer::config::AppConfig;
use nw_plant_explorer::http::{create_router, AppState};
use nw_plant_explorer::services::PlantIdentifier;
use nw_plant_explorer::upstream::InatClient;

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
        .with_thread_ids(true)
        .init();

    info!("Starting NW Native Plant Explorer API");

    let config = AppConfig::load()?;

    let source = InatClient::new(&config.inaturalist)?;
    info!(
        "Observations from {} (timeout {:?})",
        source.observations_url(),
        source.timeout()
    );

    let identifier = PlantIdentifier::from_settings(&config.vision);
    let state = AppState::new(Arc::new(source), identifier);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
