//! Dispatch server binary.

use anyhow::{bail, Result};
use dispatch_common_log::LogConfig;
use dispatch_server::{
    config::{load_config, validate_config},
    db::create_pool,
    services::bootstrap,
    Server,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = load_config()?;

    dispatch_common_log::init(
        LogConfig::from_env().with_settings(&config.logging.level, &config.logging.format),
    )?;

    if let Err(errors) = validate_config(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        bail!("configuration has {} error(s)", errors.len());
    }

    info!("Starting Dispatch Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = create_pool(&config.database).await?;
    let report = bootstrap(&pool, &config.bootstrap).await?;
    info!(
        migrated = report.migrated,
        seeded_users = report.seeded_users,
        "Bootstrap complete"
    );

    let server = Server::new(config, pool.clone())?;
    server.run().await?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}
