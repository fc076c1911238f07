//! Response builder utilities.

use super::types::{ApiResponse, ResponseMeta};
use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Builder for constructing API responses.
pub struct ResponseBuilder<T> {
    status: StatusCode,
    data: T,
    meta: ResponseMeta,
}

impl<T: Serialize> ResponseBuilder<T> {
    /// Create a new response builder.
    pub fn new(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            meta: ResponseMeta::now(),
        }
    }

    /// Set HTTP status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Copy the request ID from the incoming headers, if present.
    pub fn request_id_from(mut self, headers: &HeaderMap) -> Self {
        if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
            self.meta = self.meta.with_request_id(id);
        }
        self
    }

    /// Build the response.
    pub fn build(self) -> Response {
        let body = ApiResponse {
            success: true,
            data: self.data,
            meta: Some(self.meta),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Create a 200 OK response.
pub fn ok<T: Serialize>(data: T) -> Response {
    ResponseBuilder::new(data).build()
}

/// Create a 201 Created response.
pub fn created<T: Serialize>(data: T) -> Response {
    ResponseBuilder::new(data)
        .status(StatusCode::CREATED)
        .build()
}

/// Create a 204 No Content response.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
