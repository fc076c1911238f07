use clap::Parser;
use dispatch_server::db::{pending_migrations, run_migrations};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::CliError;

/// Apply pending database migrations
#[derive(Debug, Parser)]
pub struct MigrateCommand {
    /// Only list pending migrations
    #[arg(long)]
    pub dry_run: bool,
}

impl MigrateCommand {
    pub async fn execute(&self, pool: &SqlitePool) -> Result<(), CliError> {
        let pending = pending_migrations(pool).await?;

        if pending.is_empty() {
            println!("Database is up to date.");
            return Ok(());
        }

        for migration in &pending {
            println!("pending: {}", migration);
        }

        if self.dry_run {
            return Ok(());
        }

        run_migrations(pool).await?;
        info!(applied = pending.len(), "Migrations applied");
        println!("Applied {} migration(s).", pending.len());
        Ok(())
    }
}
