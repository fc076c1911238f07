use clap::Parser;
use dispatch_server::{config::BootstrapConfig, services::bootstrap};
use sqlx::SqlitePool;

use crate::error::CliError;

/// Insert the demo accounts into an empty database
#[derive(Debug, Parser)]
pub struct SeedCommand {}

impl SeedCommand {
    pub async fn execute(&self, pool: &SqlitePool) -> Result<(), CliError> {
        let config = BootstrapConfig {
            run_migrations: true,
            seed_demo_users: true,
        };
        let report = bootstrap(pool, &config).await?;

        if report.seeded_users == 0 {
            println!("Users already present, nothing seeded.");
        } else {
            println!("Seeded {} demo user(s).", report.seeded_users);
        }
        Ok(())
    }
}
