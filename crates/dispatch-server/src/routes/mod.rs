//! Route configuration for the dispatch API server.

mod api;

use crate::handlers::health;
use crate::middleware::{cors_layer, logging::RequestLogConfig, LoggingLayer};
use crate::state::AppState;
use axum::{
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    map_response_body::MapResponseBodyLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let common_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(MapResponseBodyLayer::new(axum::body::Body::new))
        .layer(RequestBodyLimitLayer::new(config.server.body_limit_bytes))
        .layer(cors_layer(&config.cors));

    let mut router = Router::new()
        .nest("/api", api::router(&state))
        .route("/healthz", get(health::healthz))
        .fallback(fallback_handler);

    if config.logging.log_requests {
        router = router.layer(LoggingLayer::with_config(RequestLogConfig {
            exclude_paths: config.logging.exclude_paths.clone(),
            redact_headers: Vec::new(),
        }));
    }

    router.layer(common_middleware).with_state(state)
}

async fn fallback_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "success": false,
            "error": {
                "code": "not_found",
                "message": "The requested resource was not found"
            }
        })),
    )
}
