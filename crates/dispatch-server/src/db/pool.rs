//! Database pool management.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, instrument};

/// Create a database connection pool.
///
/// File databases run in WAL mode; every connection enforces foreign keys.
/// In-memory databases keep their single connection for the pool's lifetime.
#[instrument(skip(config), fields(url = %config.url))]
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    info!("Creating database connection pool...");

    let mut connect_options = SqliteConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout());

    let mut pool_options = SqlitePoolOptions::new()
        .acquire_timeout(config.connect_timeout());

    if config.is_in_memory() {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        pool_options = pool_options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(config.idle_timeout());
    }

    let pool = pool_options
        .connect_with(connect_options)
        .await
        .context("Failed to create database pool")?;

    verify_connection(&pool).await?;

    info!(
        max_connections = config.max_connections,
        in_memory = config.is_in_memory(),
        "Database pool created"
    );

    Ok(pool)
}

/// Verify database connection.
pub async fn verify_connection(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .context("Database connection verification failed")?;

    Ok(())
}

/// Get pool statistics.
pub fn pool_stats(pool: &SqlitePool) -> PoolStats {
    let idle = pool.num_idle();
    PoolStats {
        size: pool.size(),
        idle,
        active: pool.size().saturating_sub(idle as u32),
    }
}

/// Pool statistics.
#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub active: u32,
}
