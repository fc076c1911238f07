//! CLI error handling.

use std::process::ExitCode;

use dispatch_server::ApiError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}: {source:#}")]
    Database {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        let code = match self {
            Self::Database { .. } => 3,
            Self::Validation(_) => 5,
            Self::Conflict(_) => 6,
            Self::Other(_) => 1,
        };
        ExitCode::from(code)
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ValidationError(fields) => {
                let mut details: Vec<String> = fields
                    .iter()
                    .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
                    .collect();
                details.sort();
                Self::Validation(format!("Invalid user: {}", details.join("; ")))
            }
            ApiError::Conflict(message) => Self::Conflict(message),
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}

impl From<sqlx::Error> for CliError {
    fn from(err: sqlx::Error) -> Self {
        Self::from(ApiError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_validation_errors_are_listed() {
        let mut fields = HashMap::new();
        fields.insert("role".to_string(), vec!["must be one of admin, manager, worker".to_string()]);
        let err = CliError::from(ApiError::ValidationError(fields));

        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Invalid user: role: must be one of admin, manager, worker"
        );
    }

    #[test]
    fn test_conflict_keeps_message() {
        let err = CliError::from(ApiError::Conflict("Email already registered".to_string()));
        assert!(matches!(err, CliError::Conflict(_)));
        assert_eq!(err.to_string(), "Email already registered");
    }
}
