//! Shared utilities: error handling and logging

pub mod error;
pub mod logging;
