//! Job endpoints.

use crate::error::ApiResult;
use crate::middleware::auth::Auth;
use crate::middleware::authz::{check_resource_access, AccessPolicy, Action, Resource};
use crate::request::{IdPath, JobQuery, QueryParams, ScheduleQuery};
use crate::response::ok;
use crate::state::AppState;
use axum::{extract::State, response::Response};

/// `GET /api/jobs?status`
pub async fn list_jobs(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<JobQuery>,
) -> ApiResult<Response> {
    let jobs = state.jobs.list(query.status.as_deref()).await?;
    Ok(ok(jobs))
}

/// `GET /api/jobs/:id`, for readers of jobs or a worker assigned to this one.
pub async fn get_job(
    State(state): State<AppState>,
    Auth(principal): Auth,
    IdPath(id): IdPath,
) -> ApiResult<Response> {
    let detail = state.jobs.detail(id).await?;

    check_resource_access(
        &state.registry,
        &principal,
        (Resource::Job, id),
        &detail.assigned_worker_ids,
        AccessPolicy::OwnerOrPermission(Action::Read, Resource::Job),
    )?;

    Ok(ok(detail))
}

/// `GET /api/jobs/:id/suggestions`
pub async fn job_suggestions(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Response> {
    let suggestions = state.jobs.suggestions(id).await?;
    Ok(ok(suggestions))
}

/// `GET /api/schedule/summary?from&to`
pub async fn schedule_summary(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ScheduleQuery>,
) -> ApiResult<Response> {
    let summary = state.jobs.schedule_summary(query.from, query.to).await?;
    Ok(ok(summary))
}
