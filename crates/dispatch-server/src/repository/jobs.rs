//! Job and expertise queries.

use crate::domain::{Job, RequiredExpertise, WorkerLevel};
use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};

const JOB_COLUMNS: &str = "id, title, site_address, client_name, description, priority, \
     planned_start, planned_end, status, created_at, updated_at";

/// Jobs ordered by planned start, optionally filtered by status.
pub async fn list<'e, E>(executor: E, status: Option<&str>) -> Result<Vec<Job>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Job>(&format!(
        "SELECT {JOB_COLUMNS} FROM jobs
         WHERE (? IS NULL OR status = ?)
         ORDER BY planned_start ASC, id ASC"
    ))
    .bind(status)
    .bind(status)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Job>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn required_expertise<'e, E>(
    executor: E,
    job_id: i64,
) -> Result<Vec<RequiredExpertise>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, RequiredExpertise>(
        "SELECT r.expertise_id, e.key, e.name, r.min_level, r.required
         FROM job_required_expertise r
         JOIN expertise e ON e.id = r.expertise_id
         WHERE r.job_id = ?
         ORDER BY e.key ASC",
    )
    .bind(job_id)
    .fetch_all(executor)
    .await
}

pub async fn assigned_worker_ids<'e, E>(executor: E, job_id: i64) -> Result<Vec<i64>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        "SELECT DISTINCT worker_id FROM job_assignments WHERE job_id = ? ORDER BY worker_id ASC",
    )
    .bind(job_id)
    .fetch_all(executor)
    .await
}

/// Expertise levels of every active worker.
pub async fn worker_levels<'e, E>(executor: E) -> Result<Vec<WorkerLevel>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, WorkerLevel>(
        "SELECT we.worker_id, we.expertise_id, we.level
         FROM worker_expertise we
         JOIN users u ON u.id = we.worker_id
         WHERE u.role = 'worker' AND u.is_active = 1",
    )
    .fetch_all(executor)
    .await
}

/// Jobs whose planned start falls in `[from, to)`.
pub async fn list_between<'e, E>(
    executor: E,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Job>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Job>(&format!(
        "SELECT {JOB_COLUMNS} FROM jobs
         WHERE planned_start >= ? AND planned_start < ?
         ORDER BY planned_start ASC, id ASC"
    ))
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await
}
