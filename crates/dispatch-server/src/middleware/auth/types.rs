//! Authentication types.

use crate::domain::{Role, User};
use chrono::Utc;
use dispatch_audit_types::AuditActor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// User email at issue time.
    pub email: String,
    /// User role at issue time. The guard re-reads the stored role.
    pub role: Role,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// JWT ID.
    pub jti: String,
}

impl Claims {
    /// Create new access token claims.
    pub fn new_access(user_id: i64, email: &str, role: Role, expires_in: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now,
            exp: now + expires_in,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Get user ID from the subject.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// The authenticated caller, resolved per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub email: String,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Actor recorded in the activity log for this caller.
    pub fn actor(&self) -> AuditActor {
        AuditActor::user(self.id, self.name.clone())
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
            email: user.email.clone(),
        }
    }
}
