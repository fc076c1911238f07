//! Shared application state.

use crate::ai::AiAdapter;
use crate::config::ServerConfig;
use crate::middleware::auth::{AccessGuard, TokenDecoder, TokenIssuer};
use crate::middleware::authz::RoleRegistry;
use crate::services::{ActivityService, AuthService, JobService, UserService};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Instant;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<ServerConfig>,
    pub guard: AccessGuard,
    pub registry: Arc<RoleRegistry>,
    pub auth: AuthService,
    pub users: UserService,
    pub activity: ActivityService,
    pub jobs: JobService,
    pub started_at: Instant,
}

impl AppState {
    /// Wire services over an existing pool.
    pub fn new(pool: SqlitePool, config: ServerConfig) -> Self {
        let secret = config.auth.jwt_secret.clone();
        let issuer = TokenIssuer::new(secret.clone(), config.auth.access_token_expiry_secs);
        let guard = AccessGuard::new(TokenDecoder::new(secret), pool.clone());
        let ai = Arc::new(AiAdapter::new(config.ai.clone()));

        Self {
            auth: AuthService::new(pool.clone(), issuer, config.auth.allow_passwordless_login),
            users: UserService::new(pool.clone()),
            activity: ActivityService::new(pool.clone()),
            jobs: JobService::new(pool.clone(), ai),
            registry: Arc::new(RoleRegistry::new()),
            guard,
            config: Arc::new(config),
            pool,
            started_at: Instant::now(),
        }
    }
}
