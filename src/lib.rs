//! # healthgate
//!
//! Aggregated service health reporting. Register independent probes, run
//! them concurrently with per-probe timeouts and failure isolation, and
//! combine their statuses into one overall status by fixed precedence
//! (Unhealthy > Degraded > Healthy).
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use healthgate::core::health::{
//!     EngineConfig, HealthEngine, ProbeOutcome, ProbeRegistry, probe_fn,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(ProbeRegistry::new());
//!     registry.register(
//!         "db",
//!         probe_fn(|| async { Ok(ProbeOutcome::healthy()) }),
//!         Some(Duration::from_secs(2)),
//!         ["ready"],
//!     )?;
//!
//!     let engine = HealthEngine::new(registry, EngineConfig::default());
//!     let report = engine.check_all().await;
//!     println!("overall: {}", report.overall_status());
//!     Ok(())
//! }
//! ```
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use healthgate::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/healthgate.yaml").await?;
//!     server::builder::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::health::{
    AggregateReport, DataValue, EngineConfig, HealthEngine, HealthStatus, Probe, ProbeOutcome,
    ProbeRegistration, ProbeRegistry, ProbeResult,
};
pub use utils::error::{HealthError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
