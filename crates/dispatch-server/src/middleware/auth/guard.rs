//! Access guard: credential to principal, failing closed.

use super::jwt::TokenDecoder;
use super::types::Principal;
use crate::error::{ApiError, ApiResult};
use crate::repository::users;
use sqlx::SqlitePool;
use tracing::debug;

/// Resolves bearer tokens against the current user table.
#[derive(Clone)]
pub struct AccessGuard {
    decoder: TokenDecoder,
    pool: SqlitePool,
}

impl AccessGuard {
    pub fn new(decoder: TokenDecoder, pool: SqlitePool) -> Self {
        Self { decoder, pool }
    }

    /// Resolve a token to the principal it names.
    ///
    /// The principal is built from the stored user, so role changes and
    /// deactivations apply to tokens already issued.
    pub async fn resolve(&self, token: &str) -> ApiResult<Principal> {
        let claims = self.decoder.decode(token)?;
        let user_id = claims.user_id().ok_or(ApiError::InvalidToken)?;

        match users::find_by_id(&self.pool, user_id).await? {
            Some(user) if user.is_active => Ok(Principal::from(&user)),
            Some(_) => {
                debug!(user_id, "Token for inactive user");
                Err(ApiError::Unauthorized)
            }
            None => {
                debug!(user_id, "Token for unknown user");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
