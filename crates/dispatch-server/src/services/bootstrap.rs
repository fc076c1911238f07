//! Explicit startup bootstrap: migrations and demo accounts.

use super::users::UserService;
use crate::config::BootstrapConfig;
use crate::db::run_migrations;
use crate::domain::{NewUser, Role};
use crate::error::ApiResult;
use crate::repository::users;
use anyhow::Context;
use dispatch_audit_types::AuditActor;
use sqlx::SqlitePool;
use tracing::info;

/// Accounts inserted into an empty database: (name, email, role).
pub const DEMO_USERS: &[(&str, &str, Role)] = &[
    ("Admin", "admin@example.com", Role::Admin),
    ("Manager", "manager@example.com", Role::Manager),
    ("Worker One", "worker1@example.com", Role::Worker),
    ("Worker Two", "worker2@example.com", Role::Worker),
    ("Worker Three", "worker3@example.com", Role::Worker),
];

/// What a bootstrap run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub migrated: bool,
    pub seeded_users: usize,
}

/// Run the configured startup steps once. Safe to repeat.
pub async fn bootstrap(pool: &SqlitePool, config: &BootstrapConfig) -> anyhow::Result<BootstrapReport> {
    let mut report = BootstrapReport::default();

    if config.run_migrations {
        run_migrations(pool).await?;
        report.migrated = true;
    }

    if config.seed_demo_users {
        report.seeded_users = seed_demo_users(pool)
            .await
            .context("Failed to seed demo users")?;
    }

    Ok(report)
}

/// Insert the demo accounts when no users exist. Returns how many were created.
pub async fn seed_demo_users(pool: &SqlitePool) -> ApiResult<usize> {
    if users::count(pool).await? > 0 {
        info!("Users present, skipping demo seed");
        return Ok(0);
    }

    let service = UserService::new(pool.clone());
    let actor = AuditActor::system("bootstrap");

    for (name, email, role) in DEMO_USERS {
        service
            .create_user(
                &actor,
                NewUser {
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: None,
                    role: *role,
                    is_active: true,
                    password: None,
                },
            )
            .await?;
    }

    info!(count = DEMO_USERS.len(), "Seeded demo users");
    Ok(DEMO_USERS.len())
}
