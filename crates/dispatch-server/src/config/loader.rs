//! Configuration loading utilities.

use super::types::ServerConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Load configuration from layered sources.
///
/// Precedence, lowest first: embedded defaults, the optional config file,
/// `DISPATCH__SECTION__KEY` variables, then explicit overrides.
pub struct ConfigLoader {
    config_path: Option<String>,
    env_prefix: String,
    overrides: Vec<(String, String)>,
}

/// Unprefixed variables honoured for compatibility with existing deployments.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("AI_ENABLED", "ai.enabled"),
    ("AI_PROVIDER", "ai.provider"),
    ("AI_MODEL", "ai.model"),
];

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: "DISPATCH".to_string(),
            overrides: Vec::new(),
        }
    }

    /// Set config file path.
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Override a single key, e.g. `database.url`.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Override the database URL.
    pub fn with_database_url(self, url: impl Into<String>) -> Self {
        self.with_override("database.url", url)
    }

    /// Load configuration.
    pub fn load(&self) -> Result<ServerConfig> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::File::from_str(
            include_str!("defaults.toml"),
            config::FileFormat::Toml,
        ));

        if let Some(path) = &self.config_path {
            if Path::new(path).exists() {
                info!(path = %path, "Loading config file");
                builder = builder.add_source(config::File::with_name(path));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        for (key, value) in &self.overrides {
            builder = builder
                .set_override(key.as_str(), value.as_str())
                .with_context(|| format!("Failed to apply override for {key}"))?;
        }

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<ServerConfig> {
    let mut loader = ConfigLoader::new();

    if let Ok(path) = std::env::var("CONFIG_PATH") {
        loader = loader.with_config_path(path);
    }
    for (var, key) in ENV_OVERRIDES {
        if let Ok(value) = std::env::var(var) {
            loader = loader.with_override(*key, value);
        }
    }

    loader.load()
}
