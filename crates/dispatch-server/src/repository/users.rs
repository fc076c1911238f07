//! User queries.

use crate::domain::{NewUser, User};
use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};

const USER_COLUMNS: &str =
    "id, name, email, phone, role, is_active, password_hash, created_at";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(executor)
        .await
}

/// Whether another user (other than `exclude`) already holds this email.
pub async fn email_taken<'e, E>(
    executor: E,
    email: &str,
    exclude: Option<i64>,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? AND (? IS NULL OR id != ?))",
    )
    .bind(email)
    .bind(exclude)
    .bind(exclude)
    .fetch_one(executor)
    .await
}

/// Whether another user (other than `exclude`) already holds this phone number.
pub async fn phone_taken<'e, E>(
    executor: E,
    phone: &str,
    exclude: Option<i64>,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE phone = ? AND (? IS NULL OR id != ?))",
    )
    .bind(phone)
    .bind(exclude)
    .bind(exclude)
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E>(
    executor: E,
    user: &NewUser,
    password_hash: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<User, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, phone, role, is_active, password_hash, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(user.role)
    .bind(user.is_active)
    .bind(password_hash)
    .bind(created_at)
    .fetch_one(executor)
    .await
}

/// Write every mutable column of `user`.
pub async fn update<'e, E>(executor: E, user: &User) -> Result<User, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users
         SET name = ?, email = ?, phone = ?, role = ?, is_active = ?
         WHERE id = ?
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(user.role)
    .bind(user.is_active)
    .bind(user.id)
    .fetch_one(executor)
    .await
}

/// All users, oldest id first.
pub async fn list<'e, E>(executor: E) -> Result<Vec<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"))
        .fetch_all(executor)
        .await
}

pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await
}

/// Active workers, by name.
pub async fn active_workers<'e, E>(executor: E) -> Result<Vec<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE role = 'worker' AND is_active = 1
         ORDER BY name ASC, id ASC"
    ))
    .fetch_all(executor)
    .await
}
