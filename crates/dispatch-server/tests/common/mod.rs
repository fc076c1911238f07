//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use dispatch_server::{
    config::{
        AiConfig, AuthConfig, BootstrapConfig, CorsConfig, DatabaseConfig, LoggingConfig,
        ServerBindConfig, ServerConfig,
    },
    db::{create_pool, run_migrations},
    domain::{Role, User},
    middleware::auth::TokenIssuer,
    routes::create_router,
    AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        server: ServerBindConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
            body_limit_bytes: 64 * 1024,
        },
        database: DatabaseConfig::in_memory(),
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            access_token_expiry_secs: 3600,
            allow_passwordless_login: true,
        },
        logging: LoggingConfig {
            log_requests: false,
            ..LoggingConfig::default()
        },
        cors: CorsConfig {
            allow_any_origin: true,
            ..CorsConfig::default()
        },
        bootstrap: BootstrapConfig {
            run_migrations: true,
            seed_demo_users: false,
        },
        ai: AiConfig::default(),
    }
}

/// A migrated in-memory database with a router on top of it.
pub struct TestApp {
    pub pool: SqlitePool,
    pub router: Router,
    issuer: TokenIssuer,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: ServerConfig) -> Self {
        let pool = create_pool(&config.database).await.expect("pool");
        run_migrations(&pool).await.expect("migrations");

        let issuer = TokenIssuer::new(
            config.auth.jwt_secret.clone(),
            config.auth.access_token_expiry_secs,
        );
        let router = create_router(AppState::new(pool.clone(), config));

        Self {
            pool,
            router,
            issuer,
        }
    }

    pub fn token_for(&self, user: &User) -> String {
        self.issuer.issue(user).expect("token")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}

/// Insert a user directly, bypassing the audited service path.
pub async fn insert_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    phone: Option<&str>,
    role: Role,
    is_active: bool,
) -> User {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, phone, role, is_active, created_at)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING id, name, email, phone, role, is_active, password_hash, created_at",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(role)
    .bind(is_active)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .expect("insert user")
}

/// One active user per role: (admin, manager, worker).
pub async fn seed_staff(pool: &SqlitePool) -> (User, User, User) {
    let admin = insert_user(pool, "Alice Admin", "alice@example.com", None, Role::Admin, true).await;
    let manager =
        insert_user(pool, "Mark Manager", "mark@example.com", None, Role::Manager, true).await;
    let worker = insert_user(
        pool,
        "Wendy Worker",
        "wendy@example.com",
        Some("555-0100"),
        Role::Worker,
        true,
    )
    .await;
    (admin, manager, worker)
}

pub async fn insert_job(pool: &SqlitePool, title: &str, planned_start: DateTime<Utc>) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO jobs (title, site_address, client_name, planned_start, planned_end, status)
         VALUES (?, '1 Main St', 'Acme', ?, ?, 'planned')
         RETURNING id",
    )
    .bind(title)
    .bind(planned_start)
    .bind(planned_start + chrono::Duration::hours(4))
    .fetch_one(pool)
    .await
    .expect("insert job");
    row.0
}

pub async fn insert_expertise(pool: &SqlitePool, key: &str) -> i64 {
    let row: (i64,) = sqlx::query_as("INSERT INTO expertise (key, name) VALUES (?, ?) RETURNING id")
        .bind(key)
        .bind(key)
        .fetch_one(pool)
        .await
        .expect("insert expertise");
    row.0
}

pub async fn require_expertise(pool: &SqlitePool, job_id: i64, expertise_id: i64, min_level: i64) {
    sqlx::query("INSERT INTO job_required_expertise (job_id, expertise_id, min_level) VALUES (?, ?, ?)")
        .bind(job_id)
        .bind(expertise_id)
        .bind(min_level)
        .execute(pool)
        .await
        .expect("require expertise");
}

pub async fn grant_expertise(pool: &SqlitePool, worker_id: i64, expertise_id: i64, level: i64) {
    sqlx::query("INSERT INTO worker_expertise (worker_id, expertise_id, level) VALUES (?, ?, ?)")
        .bind(worker_id)
        .bind(expertise_id)
        .bind(level)
        .execute(pool)
        .await
        .expect("grant expertise");
}

pub async fn assign(pool: &SqlitePool, job_id: i64, worker_id: i64) {
    sqlx::query("INSERT INTO job_assignments (job_id, worker_id) VALUES (?, ?)")
        .bind(job_id)
        .bind(worker_id)
        .execute(pool)
        .await
        .expect("assign");
}

pub async fn log_count(pool: &SqlitePool) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity_logs")
        .fetch_one(pool)
        .await
        .expect("count logs");
    row.0
}
