//! SQL access. Every function takes any SQLite executor so the same query
//! runs against the pool or inside an open transaction.

pub mod activity;
pub mod jobs;
pub mod users;
