//! `/api` routes.

use crate::handlers::{auth, jobs, logs, users};
use crate::middleware::{AuthLayer, AuthzLayer, Resource};
use crate::state::AppState;
use axum::{
    handler::Handler,
    routing::{get, post},
    Router,
};

/// Create the API router.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(authenticated_routes(state))
}

fn public_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(auth::login))
}

fn authenticated_routes(state: &AppState) -> Router<AppState> {
    let registry = state.registry.clone();

    Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/users",
            get(users::list_users.layer(AuthzLayer::read(registry.clone(), Resource::User)))
                .post(users::create_user.layer(AuthzLayer::create(registry.clone(), Resource::User))),
        )
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user.layer(AuthzLayer::update(registry.clone(), Resource::User)))
                .delete(
                    users::deactivate_user.layer(AuthzLayer::delete(registry.clone(), Resource::User)),
                ),
        )
        .route(
            "/logs",
            get(logs::list_logs.layer(AuthzLayer::read(registry.clone(), Resource::ActivityLog))),
        )
        .route(
            "/jobs",
            get(jobs::list_jobs.layer(AuthzLayer::read(registry.clone(), Resource::Job))),
        )
        .route("/jobs/:id", get(jobs::get_job))
        .route(
            "/jobs/:id/suggestions",
            get(jobs::job_suggestions
                .layer(AuthzLayer::read(registry.clone(), Resource::WorkerSuggestion))),
        )
        .route(
            "/schedule/summary",
            get(jobs::schedule_summary.layer(AuthzLayer::read(registry, Resource::Job))),
        )
        .route_layer(AuthLayer::new(state.guard.clone()))
}
