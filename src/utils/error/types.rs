//! Error types for healthgate

use thiserror::Error;

/// Result type alias for healthgate
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for healthgate
#[derive(Error, Debug)]
pub enum HealthError {
    /// A probe name was registered twice
    #[error("Duplicate probe registration: {0}")]
    DuplicateProbe(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure reported by a probe; displayed verbatim as the entry description
    #[error("{0}")]
    ProbeFailure(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
