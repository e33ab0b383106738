//! Configuration validation
//!
//! This module provides validation logic for the configuration structures.

use super::models::*;
use tracing::debug;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for HealthGateConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating healthgate configuration");

        self.server.validate()?;
        self.health.validate()?;
        self.validate_probes()?;

        if self.logging.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        debug!("Healthgate configuration validation completed");
        Ok(())
    }
}
