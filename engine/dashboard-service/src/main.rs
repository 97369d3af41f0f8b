//! Scout Dashboard binary
//!
//! Loads configuration, sets up logging and runs one CLI command against the
//! imported JSON data, printing the result to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use dashboard_service::{
    initialize_logging, Cli, CliHandler, DashboardConfig, DashboardService, JsonFileStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config =
        DashboardConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir.clone() {
        config.store.data_dir = data_dir;
    }

    initialize_logging(&config.logging)?;
    info!("Starting scout-dashboard v{}", env!("CARGO_PKG_VERSION"));
    info!(data_dir = %config.store.data_dir.display(), "Using imported data");

    let store = Arc::new(JsonFileStore::new(&config.store.data_dir));
    let service = DashboardService::new(config.engine.clone(), store)?;
    let handler = CliHandler::new(service);

    match handler.handle_command(cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {e:#}");
            Err(e)
        }
    }
}
