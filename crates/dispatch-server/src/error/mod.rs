//! Error handling for the dispatch API server.

pub mod context;
pub mod response;
pub mod types;

pub use context::{conflict, invalid_operation, not_found, ErrorContext};
pub use types::{ApiError, ApiResult};
