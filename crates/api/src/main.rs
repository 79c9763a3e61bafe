//! Temperature Log - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.log_level);

    info!("=== Thermolog v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.database_path.display());

    run_server(&config)
        .await
        .context("API server terminated with an error")?;

    Ok(())
}
