//! Database connection management and utilities.

pub mod health;
pub mod migration;
pub mod pool;
pub mod transaction;

pub use health::{check_health, DbHealth};
pub use migration::{pending_migrations, run_migrations};
pub use pool::{create_pool, pool_stats, verify_connection, PoolStats};
pub use transaction::begin_immediate;
