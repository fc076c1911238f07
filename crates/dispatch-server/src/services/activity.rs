//! Activity log reads.

use crate::domain::{ActivityLogEntry, LogFilter};
use crate::error::ApiResult;
use crate::repository::activity;
use crate::response::PaginatedResponse;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ActivityService {
    pool: SqlitePool,
}

impl ActivityService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// One page of entries, newest first, with the total matching the filter.
    pub async fn list(&self, filter: &LogFilter) -> ApiResult<PaginatedResponse<ActivityLogEntry>> {
        let items = activity::list(&self.pool, filter).await?;
        let total = activity::count(&self.pool, filter.action.as_deref()).await?;

        Ok(PaginatedResponse::new(
            items,
            filter.limit,
            filter.offset,
            u64::try_from(total).unwrap_or_default(),
        ))
    }
}
