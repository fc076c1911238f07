//! Middleware for the dispatch API server.

pub mod auth;
pub mod authz;
pub mod cors;
pub mod logging;

pub use auth::{AccessGuard, Auth, AuthLayer, Principal};
pub use authz::{AccessPolicy, Action, AuthzLayer, Resource, RoleRegistry};
pub use cors::cors_layer;
pub use logging::LoggingLayer;
