//! DriveBox Server — personal cloud storage.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use drivebox_core::config::AppConfig;
use drivebox_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("DRIVEBOX_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DriveBox v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = drivebox_database::connection::connect(&config.database).await?;
    drivebox_database::migration::run_migrations(&db_pool).await?;

    let blob_store = Arc::new(drivebox_storage::local::LocalBlobStore::new(&config.storage).await?);

    drivebox_api::app::run_server(Arc::new(config), db_pool, blob_store).await
}
