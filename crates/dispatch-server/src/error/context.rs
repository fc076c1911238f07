//! Error context utilities.

use super::types::ApiError;

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Add context to an error, converting to ApiError.
    fn context(self, context: impl Into<String>) -> Result<T, ApiError>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ErrorContext<T> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::Internal(anyhow::Error::from(e).context(context.into())))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, context: impl Into<String>) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::Internal(anyhow::anyhow!(context.into())))
    }
}

/// Create a not found error for a specific resource.
pub fn not_found(resource: &str, id: impl ToString) -> ApiError {
    ApiError::ResourceNotFound {
        resource: resource.to_string(),
        id: id.to_string(),
    }
}

/// Create a conflict error.
pub fn conflict(message: impl Into<String>) -> ApiError {
    ApiError::Conflict(message.into())
}

/// Create an invalid operation error.
pub fn invalid_operation(message: impl Into<String>) -> ApiError {
    ApiError::InvalidOperation(message.into())
}
