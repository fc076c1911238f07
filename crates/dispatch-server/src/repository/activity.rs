//! Activity log queries. Entries are only ever inserted.

use crate::domain::{ActivityLogEntry, LogFilter};
use chrono::{DateTime, Utc};
use dispatch_audit_types::NewActivityEntry;
use sqlx::types::Json;
use sqlx::{Executor, Sqlite};

pub async fn append<'e, E>(
    executor: E,
    entry: &NewActivityEntry,
    created_at: DateTime<Utc>,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO activity_logs (action, description, performed_by, target_user, metadata, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.action.to_string())
    .bind(&entry.description)
    .bind(entry.performed_by)
    .bind(entry.target_user)
    .bind(Json(&entry.metadata))
    .bind(created_at)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Newest entries first, names joined from current user rows.
pub async fn list<'e, E>(executor: E, filter: &LogFilter) -> Result<Vec<ActivityLogEntry>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ActivityLogEntry>(
        "SELECT l.id, l.action, l.description,
                l.performed_by, p.name AS performer_name,
                l.target_user, t.name AS target_user_name,
                l.metadata, l.created_at
         FROM activity_logs l
         LEFT JOIN users p ON p.id = l.performed_by
         LEFT JOIN users t ON t.id = l.target_user
         WHERE (? IS NULL OR l.action = ?)
         ORDER BY l.created_at DESC, l.id DESC
         LIMIT ? OFFSET ?",
    )
    .bind(&filter.action)
    .bind(&filter.action)
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(executor)
    .await
}

pub async fn count<'e, E>(executor: E, action: Option<&str>) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM activity_logs WHERE (? IS NULL OR action = ?)")
        .bind(action)
        .bind(action)
        .fetch_one(executor)
        .await
}
