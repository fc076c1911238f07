//! Error response implementation.

use super::types::ApiError;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{error, warn};

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
        } else if self.is_unauthenticated() || matches!(self, ApiError::Forbidden) {
            warn!(error = %self, code = self.error_code(), "Auth error occurred");
        }

        let status = self.status_code();
        let code = self.error_code();

        let (message, details, fields) = match &self {
            ApiError::ValidationError(field_errors) => {
                (self.to_string(), None, Some(field_errors.clone()))
            }
            ApiError::ResourceNotFound { resource, id } => {
                let details = serde_json::json!({
                    "resource": resource,
                    "id": id
                });
                (self.to_string(), Some(details), None)
            }
            ApiError::Internal(err) => {
                let message = if cfg!(debug_assertions) {
                    format!("{}: {:#}", self, err)
                } else {
                    "An internal error occurred".to_string()
                };
                (message, None, None)
            }
            ApiError::Database(err) => {
                let message = if cfg!(debug_assertions) {
                    format!("Database error: {}", err)
                } else {
                    "A database error occurred".to_string()
                };
                (message, None, None)
            }
            _ => (self.to_string(), None, None),
        };

        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code,
                message,
                details,
                fields,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Message for a storage-level unique violation, keyed on the constrained column.
fn unique_violation_message(message: &str) -> String {
    if message.contains("users.email") {
        "Email already registered".to_string()
    } else if message.contains("users.phone") {
        "Phone number already registered".to_string()
    } else {
        "Duplicate entry".to_string()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Record".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ApiError::Conflict(unique_violation_message(db_err.message()))
            }
            _ => ApiError::Database(err),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::TokenExpired,
            _ => ApiError::InvalidToken,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("invalid {}", e.code))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        ApiError::ValidationError(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_unique_violation_messages() {
        assert_eq!(
            unique_violation_message("UNIQUE constraint failed: users.email"),
            "Email already registered"
        );
        assert_eq!(
            unique_violation_message("UNIQUE constraint failed: users.phone"),
            "Phone number already registered"
        );
        assert_eq!(
            unique_violation_message("UNIQUE constraint failed: expertise.name"),
            "Duplicate entry"
        );
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::InvalidOperation("Cannot deactivate yourself".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
