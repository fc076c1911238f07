//! CLI argument definitions using clap derive macros.

use clap::{ArgAction, Parser, Subcommand};
use dispatch_server::{config::DatabaseConfig, db::create_pool};
use sqlx::SqlitePool;

use crate::commands::{AddUserCommand, DumpUsersCommand, MigrateCommand, SeedCommand};
use crate::error::CliError;

/// Dispatch operator tools
///
/// Maintain the Dispatch database: migrations, demo data and user accounts.
#[derive(Debug, Parser)]
#[command(name = "dispatch", version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Database URL
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = "sqlite://dispatch.db"
    )]
    pub database_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending database migrations
    Migrate(MigrateCommand),

    /// Insert the demo accounts into an empty database
    Seed(SeedCommand),

    /// Create a user account
    AddUser(AddUserCommand),

    /// Print every user account
    DumpUsers(DumpUsersCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<(), CliError> {
        let pool = self.connect().await?;

        let result = match &self.command {
            Command::Migrate(cmd) => cmd.execute(&pool).await,
            Command::Seed(cmd) => cmd.execute(&pool).await,
            Command::AddUser(cmd) => cmd.execute(&pool).await,
            Command::DumpUsers(cmd) => cmd.execute(&pool).await,
        };

        pool.close().await;
        result
    }

    async fn connect(&self) -> Result<SqlitePool, CliError> {
        create_pool(&DatabaseConfig::from_url(&self.database_url))
            .await
            .map_err(|e| CliError::Database {
                message: format!("Cannot open database {}", self.database_url),
                source: e,
            })
    }
}
