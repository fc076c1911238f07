//! Activity log read model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;

/// A stored activity entry with performer and target names joined from current user state.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub action: String,
    pub description: String,
    pub performed_by: Option<i64>,
    pub performer_name: Option<String>,
    pub target_user: Option<i64>,
    pub target_user_name: Option<String>,
    pub metadata: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Field names recorded under `metadata.changes`.
    pub fn changed_fields(&self) -> Vec<String> {
        self.metadata
            .as_ref()
            .and_then(|m| m.0.get("changes"))
            .and_then(Value::as_object)
            .map(|changes| changes.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Filter and window for log listings.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFilter {
    pub action: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl LogFilter {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const MAX_LIMIT: u32 = 500;
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            action: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
