//! Login and password hashing.

use crate::domain::{user::normalize_email, Role};
use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::middleware::auth::TokenIssuer;
use crate::repository::users;
use crate::request::LoginRequest;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Hash a password with argon2id and a random salt.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Check a password against a stored PHC hash string.
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Hash on the blocking pool; argon2 is too slow for an async worker.
pub async fn hash_password_blocking(password: &str) -> ApiResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing task failed: {e}")))?
}

/// Verify on the blocking pool. A failed task counts as a mismatch.
pub async fn verify_password_blocking(password: &str, hash: &str) -> bool {
    let (password, hash) = (password.to_owned(), hash.to_owned());
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .unwrap_or(false)
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    issuer: TokenIssuer,
    allow_passwordless: bool,
}

impl AuthService {
    pub fn new(pool: SqlitePool, issuer: TokenIssuer, allow_passwordless: bool) -> Self {
        Self {
            pool,
            issuer,
            allow_passwordless,
        }
    }

    /// Exchange credentials for an access token.
    ///
    /// Unknown, inactive and wrong-password attempts all fail the same way.
    pub async fn login(&self, req: LoginRequest) -> ApiResult<LoginResponse> {
        let email = normalize_email(&req.email);

        let user = users::find_by_email(&self.pool, &email)
            .await?
            .filter(|u| u.is_active)
            .ok_or(ApiError::InvalidCredentials)?;

        let accepted = match (user.password_hash.as_deref(), req.password.as_deref()) {
            (Some(hash), Some(password)) => verify_password_blocking(password, hash).await,
            (None, _) if self.allow_passwordless => {
                warn!(user_id = user.id, "Passwordless login accepted");
                true
            }
            _ => false,
        };
        if !accepted {
            warn!(user_id = user.id, "Login rejected");
            return Err(ApiError::InvalidCredentials);
        }

        let access_token = self
            .issuer
            .issue(&user)
            .context("Failed to issue access token")?;
        info!(user_id = user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.issuer.expires_in(),
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        })
    }
}
