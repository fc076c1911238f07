//! Request logging.

pub mod layer;
pub mod redaction;

pub use layer::{LoggingLayer, LoggingMiddleware, RequestLogConfig};
pub use redaction::{redact_headers, SENSITIVE_HEADERS};
