//! Configuration validation.

use super::types::ServerConfig;
use thiserror::Error;

/// The placeholder secret shipped in `defaults.toml`.
pub const PLACEHOLDER_JWT_SECRET: &str = "dispatch-development-secret-change-me";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JWT secret: must be at least 32 characters")]
    InvalidJwtSecret,

    #[error("JWT secret is the shipped placeholder; set DISPATCH__AUTH__JWT_SECRET")]
    PlaceholderJwtSecret,

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Invalid pool size: min {min} exceeds max {max}")]
    InvalidPoolSize { min: u32, max: u32 },

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}")]
    InvalidLogFormat(String),
}

/// Validate server configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.auth.jwt_secret == PLACEHOLDER_JWT_SECRET {
        errors.push(ConfigError::PlaceholderJwtSecret);
    } else if config.auth.jwt_secret.len() < 32 {
        errors.push(ConfigError::InvalidJwtSecret);
    }

    if config.database.url.trim().is_empty() {
        errors.push(ConfigError::InvalidDatabaseUrl);
    }

    if config.server.port == 0 {
        errors.push(ConfigError::InvalidPort(0));
    }

    if config.database.max_connections == 0
        || config.database.min_connections > config.database.max_connections
    {
        errors.push(ConfigError::InvalidPoolSize {
            min: config.database.min_connections,
            max: config.database.max_connections,
        });
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ConfigError::InvalidLogLevel(config.logging.level.clone()));
    }

    let valid_formats = ["pretty", "compact", "json"];
    if !valid_formats.contains(&config.logging.format.to_lowercase().as_str()) {
        errors.push(ConfigError::InvalidLogFormat(config.logging.format.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    fn valid_config() -> ServerConfig {
        ServerConfig {
            server: ServerBindConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                request_timeout_secs: 30,
                body_limit_bytes: 1024,
            },
            database: DatabaseConfig::in_memory(),
            auth: AuthConfig {
                jwt_secret: "a".repeat(32),
                access_token_expiry_secs: 3600,
                allow_passwordless_login: false,
            },
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
            bootstrap: BootstrapConfig::default(),
            ai: AiConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_short_jwt_secret() {
        let mut config = valid_config();
        config.auth.jwt_secret = "short".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigError::InvalidJwtSecret));
    }

    #[test]
    fn test_placeholder_jwt_secret_rejected() {
        let mut config = valid_config();
        config.auth.jwt_secret = PLACEHOLDER_JWT_SECRET.to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigError::PlaceholderJwtSecret));
    }

    #[test]
    fn test_shipped_defaults_need_a_real_secret() {
        let config = crate::config::ConfigLoader::new()
            .with_env_prefix("DISPATCH_TEST_UNSET_PREFIX")
            .load()
            .unwrap();

        assert!(!config.auth.allow_passwordless_login);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::PlaceholderJwtSecret)));

        let config = crate::config::ConfigLoader::new()
            .with_env_prefix("DISPATCH_TEST_UNSET_PREFIX")
            .with_override("auth.jwt_secret", "k".repeat(40))
            .load()
            .unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = valid_config();
        config.database.url = String::new();
        config.server.port = 0;
        config.logging.level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_pool_bounds() {
        let mut config = valid_config();
        config.database.min_connections = 5;
        config.database.max_connections = 2;

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ConfigError::InvalidPoolSize { min: 5, max: 2 }
        ));
    }

    #[test]
    fn test_log_format() {
        let mut config = valid_config();
        config.logging.format = "xml".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigError::InvalidLogFormat(_)));
    }
}
