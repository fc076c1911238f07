//! User endpoints.

use crate::domain::{CreateUserRequest, UpdateUserRequest, UserView};
use crate::error::ApiResult;
use crate::middleware::auth::Auth;
use crate::middleware::authz::{check_resource_access, AccessPolicy, Resource};
use crate::request::{IdPath, JsonBody};
use crate::response::{builder::ResponseBuilder, no_content, ok};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Response> {
    let users: Vec<UserView> = state.users.list().await?.iter().map(UserView::from).collect();
    Ok(ok(users))
}

/// `GET /api/users/:id`, for the user themself or an admin.
pub async fn get_user(
    State(state): State<AppState>,
    Auth(principal): Auth,
    IdPath(id): IdPath,
) -> ApiResult<Response> {
    check_resource_access(
        &state.registry,
        &principal,
        (Resource::User, id),
        &[id],
        AccessPolicy::OwnerOrAdmin,
    )?;

    let user = state.users.get(id).await?;
    Ok(ok(user.view()))
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<AppState>,
    Auth(principal): Auth,
    headers: HeaderMap,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> ApiResult<Response> {
    let user = state.users.create(&principal.actor(), req).await?;

    Ok(ResponseBuilder::new(user.view())
        .status(StatusCode::CREATED)
        .request_id_from(&headers)
        .build())
}

/// `PUT /api/users/:id`
pub async fn update_user(
    State(state): State<AppState>,
    Auth(principal): Auth,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> ApiResult<Response> {
    let user = state.users.update(&principal.actor(), id, req).await?;
    Ok(ok(user.view()))
}

/// `DELETE /api/users/:id` deactivates; users are never removed.
pub async fn deactivate_user(
    State(state): State<AppState>,
    Auth(principal): Auth,
    IdPath(id): IdPath,
) -> ApiResult<Response> {
    state.users.deactivate(&principal.actor(), id).await?;
    Ok(no_content())
}
