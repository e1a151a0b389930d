//! # Prefab API
//!
//! Entry point: initializes tracing, loads configuration, connects the
//! prefab store and serves the HTTP API.

use anyhow::Result;
use tracing::info;

use prefab_api::config::Settings;
use prefab_api::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    prefab_api::telemetry::init_tracing();

    info!("Starting Prefab API...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        store = ?settings.store.backend,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
