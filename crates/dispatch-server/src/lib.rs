//! Dispatch API server.
//!
//! Staff authenticate with a bearer token, admins manage user accounts, and
//! every account mutation is recorded in an append-only activity log in the
//! same transaction as the change itself.
//!
//! Layers, outermost first:
//!
//! - **Routes**: HTTP endpoint definitions and middleware stack
//! - **Handlers**: Request extraction and response shaping
//! - **Services**: Business rules and transactions
//! - **Repositories**: SQL against the SQLite pool
//! - **Middleware**: Authentication, authorization, CORS and request logging

#![warn(clippy::all)]

pub mod ai;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod request;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::Router;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Server builder for constructing and running the API server.
pub struct Server {
    addr: SocketAddr,
    state: AppState,
}

impl Server {
    /// Create a server over an already prepared pool.
    pub fn new(config: ServerConfig, pool: SqlitePool) -> anyhow::Result<Self> {
        let addr = config.socket_addr()?;
        let state = AppState::new(pool, config);
        Ok(Self { addr, state })
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;

        info!("Server listening on {}", self.addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
