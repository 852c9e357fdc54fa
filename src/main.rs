//! # Realty API Main Entry Point

use migration::{Migrator, MigratorTrait};
use realty_api::{config::ConfigLoader, db, seeds, server::run_server, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!("Configuration: {}", redacted_json);
    }

    let pool = db::init_pool(&config).await?;
    Migrator::up(&pool, None).await?;

    if config.seed_demo_data {
        seeds::seed_demo_data(&pool).await?;
    }

    // Start the server with the loaded configuration
    run_server(config, pool).await
}
