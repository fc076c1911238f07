//! Request logging middleware.

use super::redaction::redact_headers;
use axum::{body::Body, extract::Request, http::Response};
use futures::future::BoxFuture;
use std::{
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Request logging layer.
#[derive(Clone, Default)]
pub struct LoggingLayer {
    config: RequestLogConfig,
}

#[derive(Clone, Default)]
pub struct RequestLogConfig {
    /// Paths to exclude from logging.
    pub exclude_paths: Vec<String>,
    /// Headers to redact, in addition to the built-in list.
    pub redact_headers: Vec<String>,
}

impl LoggingLayer {
    pub fn with_config(config: RequestLogConfig) -> Self {
        Self { config }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddleware {
            inner,
            config: self.config.clone(),
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddleware<S> {
    inner: S,
    config: RequestLogConfig,
}

impl<S> Service<Request> for LoggingMiddleware<S>
where
    S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let config = self.config.clone();
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_string();
        if config.exclude_paths.iter().any(|p| path.starts_with(p)) {
            return Box::pin(inner.call(req));
        }

        let method = req.method().clone();
        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        debug!(
            parent: &span,
            headers = ?redact_headers(req.headers(), &config.redact_headers),
            "Request headers"
        );

        Box::pin(
            async move {
                let start = Instant::now();
                info!(event = "request_started", uri = %req.uri());

                let response = inner.call(req).await?;

                let status = response.status();
                let duration_ms = start.elapsed().as_millis() as u64;
                if status.is_server_error() {
                    warn!(event = "request_completed", status = status.as_u16(), duration_ms);
                } else {
                    info!(event = "request_completed", status = status.as_u16(), duration_ms);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}
