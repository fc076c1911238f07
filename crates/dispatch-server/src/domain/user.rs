//! Users and the requests that mutate them.

use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use validator::Validate;

/// Closed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Worker,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Parse a role name, reporting unknown values as a `role` field error.
    pub fn parse(value: &str) -> ApiResult<Self> {
        Role::from_str(value.trim()).map_err(|_| {
            let allowed: Vec<String> = Role::iter().map(|r| r.to_string()).collect();
            ApiError::field(
                "role",
                format!("must be one of {}", allowed.join(", ")),
            )
        })
    }
}

/// A stored user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Audited fields as they currently stand.
    pub fn audit_snapshot(&self) -> Map<String, Value> {
        audit_fields(&self.name, &self.email, self.phone.as_deref(), self.role, self.is_active)
    }

    pub fn view(&self) -> UserView {
        UserView::from(self)
    }
}

fn audit_fields(
    name: &str,
    email: &str,
    phone: Option<&str>,
    role: Role,
    is_active: bool,
) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("name".into(), json!(name));
    fields.insert("email".into(), json!(email));
    fields.insert("phone".into(), json!(phone));
    fields.insert("role".into(), json!(role));
    fields.insert("is_active".into(), json!(is_active));
    fields
}

/// Public representation of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Trim and lower-case an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim a phone number; blank means no phone.
pub fn normalize_phone(phone: Option<&str>) -> Option<String> {
    phone
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// User creation request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: Option<String>,
}

/// A validated, normalized user ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub password: Option<String>,
}

impl NewUser {
    pub fn audit_snapshot(&self) -> Map<String, Value> {
        audit_fields(&self.name, &self.email, self.phone.as_deref(), self.role, self.is_active)
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ApiError;

    fn try_from(mut req: CreateUserRequest) -> ApiResult<Self> {
        req.name = req.name.trim().to_string();
        req.email = normalize_email(&req.email);
        req.phone = normalize_phone(req.phone.as_deref());
        req.validate()?;

        Ok(Self {
            role: Role::parse(&req.role)?,
            name: req.name,
            email: req.email,
            phone: req.phone,
            is_active: req.is_active,
            password: req.password,
        })
    }
}

/// User update request. Absent fields are left untouched; an empty phone clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub phone: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the phone number.
    pub phone: Option<Option<String>>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// Proposed values for the fields this update touches.
    pub fn proposed(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(name) = &self.name {
            fields.insert("name".into(), json!(name));
        }
        if let Some(email) = &self.email {
            fields.insert("email".into(), json!(email));
        }
        if let Some(phone) = &self.phone {
            fields.insert("phone".into(), json!(phone));
        }
        if let Some(role) = &self.role {
            fields.insert("role".into(), json!(role));
        }
        if let Some(is_active) = self.is_active {
            fields.insert("is_active".into(), json!(is_active));
        }
        fields
    }

    /// Apply to a copy of `user`.
    pub fn apply_to(&self, user: &User) -> User {
        let mut updated = user.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            updated.phone = phone.clone();
        }
        if let Some(role) = self.role {
            updated.role = role;
        }
        if let Some(is_active) = self.is_active {
            updated.is_active = is_active;
        }
        updated
    }
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = ApiError;

    fn try_from(mut req: UpdateUserRequest) -> ApiResult<Self> {
        req.name = req.name.map(|n| n.trim().to_string());
        req.email = req.email.map(|e| normalize_email(&e));
        req.phone = req.phone.map(|p| p.trim().to_string());
        req.validate()?;

        Ok(Self {
            name: req.name,
            email: req.email,
            phone: req.phone.map(|p| normalize_phone(Some(&p))),
            role: req.role.as_deref().map(Role::parse).transpose()?,
            is_active: req.is_active,
        })
    }
}
