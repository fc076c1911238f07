//! Request extractors and query parameter types.

use crate::domain::LogFilter;
use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::request::Parts,
};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize};

/// JSON body extractor whose rejections use the API error format.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| JsonBody(value))
            .map_err(|rejection: JsonRejection| ApiError::BadRequest(rejection.body_text()))
    }
}

/// Query string extractor whose rejections use the API error format.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Query(value)| QueryParams(value))
            .map_err(|rejection: QueryRejection| {
                ApiError::InvalidQueryParam(rejection.body_text())
            })
    }
}

/// Numeric path id extractor.
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Path(id)| IdPath(id))
            .map_err(|rejection: PathRejection| ApiError::BadRequest(rejection.body_text()))
    }
}

/// Query parameters for `GET /api/logs`.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub action: Option<String>,
}

impl TryFrom<LogQuery> for LogFilter {
    type Error = ApiError;

    fn try_from(query: LogQuery) -> Result<Self, Self::Error> {
        let limit = query.limit.unwrap_or(LogFilter::DEFAULT_LIMIT);
        if limit > LogFilter::MAX_LIMIT {
            return Err(ApiError::InvalidQueryParam(format!(
                "limit must be at most {}",
                LogFilter::MAX_LIMIT
            )));
        }

        Ok(LogFilter {
            action: query.action.filter(|a| !a.is_empty()),
            limit,
            offset: query.offset.unwrap_or(0),
        })
    }
}

/// Query parameters for `GET /api/jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    pub status: Option<String>,
}

/// Query parameters for `GET /api/schedule/summary`.
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}
