//! JWT encoding and decoding utilities.

use super::types::Claims;
use crate::domain::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

/// Encode claims into a JWT token.
pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate a JWT token.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Token decoder for use in the access guard.
#[derive(Clone)]
pub struct TokenDecoder {
    secret: Arc<String>,
}

impl TokenDecoder {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::new(secret.into()),
        }
    }

    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode_token(token, &self.secret)
    }
}

/// Issues access tokens on login.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Arc<String>,
    expires_in: i64,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, expires_in_secs: u64) -> Self {
        Self {
            secret: Arc::new(secret.into()),
            expires_in: i64::try_from(expires_in_secs).unwrap_or(i64::MAX / 2),
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::new_access(user.id, &user.email, user.role, self.expires_in);
        encode_token(&claims, &self.secret)
    }
}
