//! Health engine configuration

use super::*;
use crate::core::health::EngineConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Health endpoint and engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Path the health endpoint is served on
    #[serde(default = "default_health_path")]
    pub path: String,
    /// Timeout for probes without their own, in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub default_timeout_ms: u64,
    /// Maximum number of probes running at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Overall deadline for one query, in milliseconds
    #[serde(default)]
    pub query_timeout_ms: Option<u64>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: default_health_path(),
            default_timeout_ms: default_probe_timeout_ms(),
            max_concurrency: default_max_concurrency(),
            query_timeout_ms: None,
        }
    }
}

impl HealthConfig {
    /// Merge health configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.path != default_health_path() {
            self.path = other.path;
        }
        if other.default_timeout_ms != default_probe_timeout_ms() {
            self.default_timeout_ms = other.default_timeout_ms;
        }
        if other.max_concurrency != default_max_concurrency() {
            self.max_concurrency = other.max_concurrency;
        }
        if other.query_timeout_ms.is_some() {
            self.query_timeout_ms = other.query_timeout_ms;
        }
        self
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            default_timeout: Duration::from_millis(self.default_timeout_ms),
            max_concurrency: self.max_concurrency,
            query_timeout: self.query_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Validate health configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.path.starts_with('/') {
            return Err(format!("Health path must start with '/': {}", self.path));
        }

        if self.default_timeout_ms == 0 {
            return Err("Default probe timeout cannot be 0".to_string());
        }

        if self.max_concurrency == 0 {
            return Err("Max concurrency cannot be 0".to_string());
        }

        if self.query_timeout_ms == Some(0) {
            return Err("Query timeout cannot be 0".to_string());
        }

        Ok(())
    }
}
