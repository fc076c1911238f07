//! Success response envelope and helpers.

pub mod builder;
pub mod pagination;
pub mod types;

pub use builder::{created, no_content, ok};
pub use pagination::{PaginatedResponse, PaginationMeta};
pub use types::{ApiResponse, ResponseMeta};
