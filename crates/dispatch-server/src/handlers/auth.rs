//! Login and current-principal endpoints.

use crate::error::ApiResult;
use crate::middleware::auth::Auth;
use crate::request::{JsonBody, LoginRequest};
use crate::response::ok;
use crate::state::AppState;
use axum::{extract::State, response::Response};

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<Response> {
    let login = state.auth.login(req).await?;
    Ok(ok(login))
}

/// `GET /api/auth/me`
pub async fn me(Auth(principal): Auth) -> Response {
    ok(principal)
}
