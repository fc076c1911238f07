mod common;

use common::{insert_user, log_count, seed_staff, test_config};
use dispatch_audit_types::AuditActor;
use chrono::Utc;
use dispatch_server::{
    config::DatabaseConfig,
    db::{create_pool, run_migrations},
    domain::{CreateUserRequest, LogFilter, NewUser, Role, User, UserChanges},
    repository::users,
    services::{seed_demo_users, ActivityService, UserService, DEMO_USERS},
    ApiError,
};
use proptest::prelude::*;
use serde_json::json;
use sqlx::SqlitePool;

async fn pool() -> SqlitePool {
    let pool = create_pool(&test_config().database).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

fn actor(user: &User) -> AuditActor {
    AuditActor::user(user.id, user.name.clone())
}

fn create_request(role: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: "Eve".to_string(),
        email: "eve@x.com".to_string(),
        phone: None,
        role: role.to_string(),
        is_active: true,
        password: None,
    }
}

#[tokio::test]
async fn test_rejected_create_leaves_no_trace() {
    let pool = pool().await;
    let (admin, _, _) = seed_staff(&pool).await;
    let service = UserService::new(pool.clone());

    let err = service
        .create(&actor(&admin), create_request("superadmin"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));

    let mut duplicate = create_request("worker");
    duplicate.email = admin.email.clone();
    let err = service.create(&actor(&admin), duplicate).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    assert_eq!(service.list().await.unwrap().len(), 3);
    assert_eq!(log_count(&pool).await, 0);
}

#[tokio::test]
async fn test_create_records_every_field() {
    let pool = pool().await;
    let (admin, _, _) = seed_staff(&pool).await;

    let user = UserService::new(pool.clone())
        .create(&actor(&admin), create_request("worker"))
        .await
        .unwrap();

    let page = ActivityService::new(pool.clone())
        .list(&LogFilter::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);

    let entry = &page.items[0];
    assert_eq!(entry.action, "user_created");
    assert_eq!(entry.target_user, Some(user.id));
    assert_eq!(
        entry.description,
        "Alice Admin created user Eve: email: none \u{2192} eve@x.com, is_active: none \u{2192} true, \
         name: none \u{2192} Eve, role: none \u{2192} worker"
    );

    let mut fields = entry.changed_fields();
    fields.sort();
    assert_eq!(fields, vec!["email", "is_active", "name", "role"]);
}

#[tokio::test]
async fn test_deactivate_inactive_user_still_logged() {
    let pool = pool().await;
    let (admin, _, _) = seed_staff(&pool).await;
    let gone = insert_user(&pool, "Gone", "gone@example.com", None, Role::Worker, false).await;
    let service = UserService::new(pool.clone());

    let user = service.deactivate(&actor(&admin), gone.id).await.unwrap();
    assert!(!user.is_active);

    let page = ActivityService::new(pool.clone())
        .list(&LogFilter::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].action, "user_deactivated");
    assert!(page.items[0].changed_fields().is_empty());
}

#[tokio::test]
async fn test_deactivate_missing_user() {
    let pool = pool().await;
    let (admin, _, _) = seed_staff(&pool).await;

    let err = UserService::new(pool.clone())
        .deactivate(&actor(&admin), 404)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert_eq!(log_count(&pool).await, 0);
}

#[tokio::test]
async fn test_clearing_phone_is_a_change() {
    let pool = pool().await;
    let (admin, _, worker) = seed_staff(&pool).await;

    let updated = UserService::new(pool.clone())
        .update_user(
            &actor(&admin),
            worker.id,
            UserChanges {
                phone: Some(None),
                ..UserChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone, None);

    let page = ActivityService::new(pool.clone())
        .list(&LogFilter::default())
        .await
        .unwrap();
    let metadata = &page.items[0].metadata.as_ref().unwrap().0;
    assert_eq!(metadata["changes"]["phone"]["old"], json!("555-0100"));
    assert_eq!(metadata["changes"]["phone"]["new"], json!(null));
}

#[tokio::test]
async fn test_seed_demo_users_runs_once() {
    let pool = pool().await;

    let seeded = seed_demo_users(&pool).await.unwrap();
    assert_eq!(seeded, DEMO_USERS.len());
    assert_eq!(log_count(&pool).await, DEMO_USERS.len() as i64);

    let page = ActivityService::new(pool.clone())
        .list(&LogFilter::default())
        .await
        .unwrap();
    assert!(page.items.iter().all(|e| e.performed_by.is_none()));

    assert_eq!(seed_demo_users(&pool).await.unwrap(), 0);
    assert_eq!(log_count(&pool).await, DEMO_USERS.len() as i64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_on_file_database_all_commit() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("dispatch.db").display());
    let pool = create_pool(&DatabaseConfig::from_url(url)).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let (admin, _, _) = seed_staff(&pool).await;
    let mut ids = Vec::new();
    for i in 0..8 {
        let worker = insert_user(
            &pool,
            &format!("Crew {i}"),
            &format!("crew{i}@example.com"),
            None,
            Role::Worker,
            true,
        )
        .await;
        ids.push(worker.id);
    }

    let service = UserService::new(pool.clone());
    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let service = service.clone();
            let actor = actor(&admin);
            tokio::spawn(async move {
                let changes = UserChanges {
                    name: Some(format!("Renamed {id}")),
                    ..UserChanges::default()
                };
                service.update_user(&actor, id, changes).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(log_count(&pool).await, ids.len() as i64);
    for id in ids {
        assert_eq!(service.get(id).await.unwrap().name, format!("Renamed {id}"));
    }

    pool.close().await;
}

#[tokio::test]
async fn test_storage_unique_violation_is_a_conflict() {
    let pool = pool().await;
    let (admin, _, worker) = seed_staff(&pool).await;

    let same_email = NewUser {
        name: "Copy".to_string(),
        email: worker.email.clone(),
        phone: None,
        role: Role::Worker,
        is_active: true,
        password: None,
    };
    let err = ApiError::from(users::insert(&pool, &same_email, None, Utc::now()).await.unwrap_err());
    assert!(
        matches!(&err, ApiError::Conflict(m) if m == "Email already registered"),
        "{err:?}"
    );

    let same_phone = NewUser {
        email: "copy@example.com".to_string(),
        phone: worker.phone.clone(),
        ..same_email
    };
    let err = ApiError::from(users::insert(&pool, &same_phone, None, Utc::now()).await.unwrap_err());
    assert!(
        matches!(&err, ApiError::Conflict(m) if m == "Phone number already registered"),
        "{err:?}"
    );

    let mut clash = admin.clone();
    clash.email = worker.email.clone();
    let err = ApiError::from(users::update(&pool, &clash).await.unwrap_err());
    assert!(
        matches!(&err, ApiError::Conflict(m) if m == "Email already registered"),
        "{err:?}"
    );

    assert_eq!(users::count(&pool).await.unwrap(), 3);
}

fn field_flags() -> impl Strategy<Value = [bool; 5]> {
    prop::array::uniform5(any::<bool>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_update_logs_exactly_changed_fields(flags in field_flags()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async move {
            let pool = pool().await;
            let (admin, _, worker) = seed_staff(&pool).await;
            let [name, email, phone, role, active] = flags;

            // Unflagged fields are proposed with their current value.
            let changes = UserChanges {
                name: Some(if name { "Renamed".to_string() } else { worker.name.clone() }),
                email: Some(if email { "renamed@example.com".to_string() } else { worker.email.clone() }),
                phone: Some(if phone { Some("555-0199".to_string()) } else { worker.phone.clone() }),
                role: Some(if role { Role::Manager } else { worker.role }),
                is_active: Some(if active { false } else { worker.is_active }),
            };

            let expected: Vec<&str> = ["email", "is_active", "name", "phone", "role"]
                .into_iter()
                .filter(|field| match *field {
                    "name" => name,
                    "email" => email,
                    "phone" => phone,
                    "role" => role,
                    _ => active,
                })
                .collect();

            UserService::new(pool.clone())
                .update_user(&actor(&admin), worker.id, changes)
                .await
                .unwrap();

            let page = ActivityService::new(pool.clone())
                .list(&LogFilter::default())
                .await
                .unwrap();

            if expected.is_empty() {
                assert!(page.items.is_empty());
                return;
            }

            assert_eq!(page.items.len(), 1);
            let mut fields = page.items[0].changed_fields();
            fields.sort();
            assert_eq!(fields, expected);

            let metadata = &page.items[0].metadata.as_ref().unwrap().0;
            if name {
                assert_eq!(metadata["changes"]["name"]["old"], json!(worker.name));
                assert_eq!(metadata["changes"]["name"]["new"], json!("Renamed"));
            }
            if active {
                assert_eq!(metadata["changes"]["is_active"]["old"], json!(true));
                assert_eq!(metadata["changes"]["is_active"]["new"], json!(false));
            }
        });
    }
}
