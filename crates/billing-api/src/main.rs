//! Billing API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p billing-api
//! ```
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honored). `JWT_SECRET` and `API_PORT` are required.

use billing_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Billing API Server...");

    let config = AppConfig::from_env()?;

    info!(
        env = ?config.app.env,
        port = config.server.port,
        "configuration loaded"
    );

    billing_api::run(config).await
}
