//! Job reads and worker suggestions.

use crate::ai::{expertise_score, AiAdapter, WorkerCandidate, WorkerSuggestion};
use crate::domain::{Job, JobDetail};
use crate::error::{not_found, ApiError, ApiResult};
use crate::repository::{jobs, users};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;

/// Summary of the jobs planned in a window.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSummary {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub job_count: usize,
    pub summary: String,
}

#[derive(Clone)]
pub struct JobService {
    pool: SqlitePool,
    ai: Arc<AiAdapter>,
}

impl JobService {
    pub fn new(pool: SqlitePool, ai: Arc<AiAdapter>) -> Self {
        Self { pool, ai }
    }

    pub async fn list(&self, status: Option<&str>) -> ApiResult<Vec<Job>> {
        Ok(jobs::list(&self.pool, status).await?)
    }

    pub async fn detail(&self, id: i64) -> ApiResult<JobDetail> {
        let job = jobs::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found("Job", id))?;

        Ok(JobDetail {
            required_expertise: jobs::required_expertise(&self.pool, id).await?,
            assigned_worker_ids: jobs::assigned_worker_ids(&self.pool, id).await?,
            job,
        })
    }

    /// Rank active workers for a job by expertise match.
    pub async fn suggestions(&self, id: i64) -> ApiResult<Vec<WorkerSuggestion>> {
        let job = jobs::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found("Job", id))?;
        let requirements = jobs::required_expertise(&self.pool, id).await?;

        let mut levels: HashMap<i64, HashMap<i64, i64>> = HashMap::new();
        for level in jobs::worker_levels(&self.pool).await? {
            levels
                .entry(level.worker_id)
                .or_default()
                .insert(level.expertise_id, level.level);
        }

        let empty = HashMap::new();
        let candidates: Vec<WorkerCandidate> = users::active_workers(&self.pool)
            .await?
            .into_iter()
            .map(|worker| WorkerCandidate {
                expertise_score: Some(expertise_score(
                    &requirements,
                    levels.get(&worker.id).unwrap_or(&empty),
                )),
                id: worker.id,
                name: worker.name,
            })
            .collect();

        Ok(self.ai.suggest_workers(&job, &candidates))
    }

    /// Summarize jobs planned to start in `[from, to)`.
    pub async fn schedule_summary(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApiResult<ScheduleSummary> {
        if to <= from {
            return Err(ApiError::InvalidQueryParam(
                "to must be after from".to_string(),
            ));
        }

        let planned = jobs::list_between(&self.pool, from, to).await?;

        Ok(ScheduleSummary {
            from,
            to,
            job_count: planned.len(),
            summary: self.ai.schedule_summary(from, to, &planned),
        })
    }
}
