//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::health::HealthEngine;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloned into every actix worker; all fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Configuration (shared read-only)
    pub config: Arc<Config>,
    /// Health aggregation engine
    pub engine: Arc<HealthEngine>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, engine: HealthEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
