//! Audited user mutations.
//!
//! Every write runs in one transaction together with the activity entry that
//! describes it: either both are committed or neither is. Transactions take
//! the write lock up front, so concurrent mutations queue rather than fail. Uniqueness is
//! pre-checked for a friendly error, but the table constraints remain the
//! authority and their violations surface as conflicts too.

use super::auth::hash_password_blocking;
use crate::db::begin_immediate;
use crate::domain::{CreateUserRequest, NewUser, UpdateUserRequest, User, UserChanges};
use crate::error::{conflict, invalid_operation, not_found, ApiResult};
use crate::repository::{activity, users};
use chrono::Utc;
use dispatch_audit_types::{ActivityAction, AuditActor, ChangeSet, NewActivityEntry};
use serde_json::{json, Map};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, instrument};

const SELF_DEACTIVATION: &str = "You cannot deactivate your own account";

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All users by ascending id.
    pub async fn list(&self) -> ApiResult<Vec<User>> {
        Ok(users::list(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        users::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found("User", id))
    }

    /// Validate and create a user.
    pub async fn create(&self, actor: &AuditActor, req: CreateUserRequest) -> ApiResult<User> {
        let new_user = NewUser::try_from(req)?;
        self.create_user(actor, new_user).await
    }

    /// Create an already validated user and record `user_created`.
    #[instrument(skip(self, actor, new_user), fields(actor = %actor.display_name(), email = %new_user.email))]
    pub async fn create_user(&self, actor: &AuditActor, new_user: NewUser) -> ApiResult<User> {
        let password_hash = match new_user.password.as_deref() {
            Some(password) => Some(hash_password_blocking(password).await?),
            None => None,
        };

        let mut tx = begin_immediate(&self.pool).await?;

        ensure_unique(&mut tx, Some(&new_user.email), new_user.phone.as_deref(), None).await?;

        let user = users::insert(&mut *tx, &new_user, password_hash.as_deref(), Utc::now()).await?;

        let entry = NewActivityEntry::builder(ActivityAction::UserCreated, actor.clone())
            .target(user.id, user.name.clone())
            .changes(ChangeSet::for_creation(&new_user.audit_snapshot()))
            .build();
        activity::append(&mut *tx, &entry, Utc::now()).await?;

        tx.commit().await?;

        info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Validate and apply a partial update.
    pub async fn update(
        &self,
        actor: &AuditActor,
        id: i64,
        req: UpdateUserRequest,
    ) -> ApiResult<User> {
        let changes = UserChanges::try_from(req)?;
        self.update_user(actor, id, changes).await
    }

    /// Apply only the fields that differ and record `user_updated`.
    ///
    /// A proposal equal to the stored row changes nothing and records nothing.
    #[instrument(skip(self, actor, changes), fields(actor = %actor.display_name()))]
    pub async fn update_user(
        &self,
        actor: &AuditActor,
        id: i64,
        changes: UserChanges,
    ) -> ApiResult<User> {
        let mut tx = begin_immediate(&self.pool).await?;

        let current = users::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found("User", id))?;

        let change_set = ChangeSet::diff(&current.audit_snapshot(), &changes.proposed());
        if change_set.is_empty() {
            debug!(user_id = id, "Update is a no-op");
            return Ok(current);
        }

        let deactivating = change_set
            .get("is_active")
            .map(|c| c.new == json!(false))
            .unwrap_or(false);
        if deactivating && actor.user_id() == Some(id) {
            return Err(invalid_operation(SELF_DEACTIVATION));
        }

        let updated = changes.apply_to(&current);
        let email = change_set.contains("email").then_some(updated.email.as_str());
        let phone = change_set
            .contains("phone")
            .then_some(updated.phone.as_deref())
            .flatten();
        ensure_unique(&mut tx, email, phone, Some(id)).await?;

        let updated = users::update(&mut *tx, &updated).await?;
        let changed = change_set.len();

        let entry = NewActivityEntry::builder(ActivityAction::UserUpdated, actor.clone())
            .target(id, current.name.clone())
            .changes(change_set)
            .build();
        activity::append(&mut *tx, &entry, Utc::now()).await?;

        tx.commit().await?;

        info!(user_id = id, changed, "User updated");
        Ok(updated)
    }

    /// Soft-delete a user and record `user_deactivated`.
    ///
    /// Deactivating an already inactive user leaves the row as is but is still recorded.
    #[instrument(skip(self, actor), fields(actor = %actor.display_name()))]
    pub async fn deactivate(&self, actor: &AuditActor, id: i64) -> ApiResult<User> {
        if actor.user_id() == Some(id) {
            return Err(invalid_operation(SELF_DEACTIVATION));
        }

        let mut tx = begin_immediate(&self.pool).await?;

        let current = users::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found("User", id))?;

        let mut proposed = Map::new();
        proposed.insert("is_active".into(), json!(false));
        let change_set = ChangeSet::diff(&current.audit_snapshot(), &proposed);

        let updated = if change_set.is_empty() {
            current.clone()
        } else {
            let mut target = current.clone();
            target.is_active = false;
            users::update(&mut *tx, &target).await?
        };

        let entry = NewActivityEntry::builder(ActivityAction::UserDeactivated, actor.clone())
            .target(id, current.name.clone())
            .changes(change_set)
            .build();
        activity::append(&mut *tx, &entry, Utc::now()).await?;

        tx.commit().await?;

        info!(user_id = id, "User deactivated");
        Ok(updated)
    }
}

/// Reject an email or phone number already held by someone other than `exclude`.
async fn ensure_unique(
    tx: &mut Transaction<'static, Sqlite>,
    email: Option<&str>,
    phone: Option<&str>,
    exclude: Option<i64>,
) -> ApiResult<()> {
    if let Some(email) = email {
        if users::email_taken(&mut **tx, email, exclude).await? {
            return Err(conflict("Email already registered"));
        }
    }
    if let Some(phone) = phone {
        if users::phone_taken(&mut **tx, phone, exclude).await? {
            return Err(conflict("Phone number already registered"));
        }
    }
    Ok(())
}
