//! Error handling for healthgate
//!
//! This module defines the error type shared by the registry, configuration
//! loading and the server. Probe failures use it too, but the engine always
//! converts them into report entries instead of propagating them.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{HealthError, Result};
