//! Configuration data models
//!
//! This module defines all configuration structures used by healthgate.

pub mod health;
pub mod healthgate;
pub mod logging;
pub mod probe;
pub mod server;

pub use health::*;
pub use healthgate::*;
pub use logging::*;
pub use probe::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default path of the health endpoint
pub fn default_health_path() -> String {
    "/api/health".to_string()
}

/// Default probe timeout in milliseconds
pub fn default_probe_timeout_ms() -> u64 {
    5_000
}

/// Default number of probes run at once
pub fn default_max_concurrency() -> usize {
    16
}

/// Default log level directive
pub fn default_log_level() -> String {
    "info".to_string()
}
