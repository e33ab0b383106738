//! Helper functions for creating specific error types

use super::types::HealthError;

impl HealthError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn probe_failure<S: Into<String>>(reason: S) -> Self {
        Self::ProbeFailure(reason.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Errors that must stop the process before it serves queries
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, HealthError::DuplicateProbe(_) | HealthError::Config(_))
    }
}
