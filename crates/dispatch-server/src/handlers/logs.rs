//! Activity log endpoint.

use crate::domain::LogFilter;
use crate::error::ApiResult;
use crate::request::{LogQuery, QueryParams};
use crate::response::ok;
use crate::state::AppState;
use axum::{extract::State, response::Response};

/// `GET /api/logs?limit&offset&action`
pub async fn list_logs(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LogQuery>,
) -> ApiResult<Response> {
    let filter = LogFilter::try_from(query)?;
    let page = state.activity.list(&filter).await?;
    Ok(ok(page))
}
