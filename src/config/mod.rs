//! Configuration management for healthgate
//!
//! This module handles loading, validation, and merging of configuration from
//! YAML files and environment variables.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{HealthError, Result};
use std::env;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub gateway: HealthGateConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HealthError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: HealthGateConfig = serde_yaml::from_str(&content)
            .map_err(|e| HealthError::Config(format!("Failed to parse config: {}", e)))?;

        let mut config = Self { gateway };
        config.apply_env_overrides()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from `HEALTHGATE_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        let gateway = &mut self.gateway;

        if let Ok(host) = env::var("HEALTHGATE_HOST") {
            gateway.server.host = host;
        }
        if let Some(port) = parse_env("HEALTHGATE_PORT")? {
            gateway.server.port = port;
        }
        if let Some(workers) = parse_env("HEALTHGATE_WORKERS")? {
            gateway.server.workers = Some(workers);
        }
        if let Ok(path) = env::var("HEALTHGATE_PATH") {
            gateway.health.path = path;
        }
        if let Some(timeout) = parse_env("HEALTHGATE_DEFAULT_TIMEOUT_MS")? {
            gateway.health.default_timeout_ms = timeout;
        }
        if let Some(limit) = parse_env("HEALTHGATE_MAX_CONCURRENCY")? {
            gateway.health.max_concurrency = limit;
        }
        if let Some(timeout) = parse_env("HEALTHGATE_QUERY_TIMEOUT_MS")? {
            gateway.health.query_timeout_ms = Some(timeout);
        }
        if let Ok(level) = env::var("HEALTHGATE_LOG_LEVEL") {
            gateway.logging.level = level;
        }
        if let Some(json) = parse_env("HEALTHGATE_LOG_JSON")? {
            gateway.logging.json = json;
        }

        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get health configuration
    pub fn health(&self) -> &HealthConfig {
        &self.gateway.health
    }

    /// Get configured probes
    pub fn probes(&self) -> &[ProbeConfig] {
        &self.gateway.probes
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(&self.gateway).map_err(HealthError::Config)
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.gateway = self.gateway.merge(other.gateway);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| HealthError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HealthError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
