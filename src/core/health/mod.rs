//! Health aggregation
//!
//! This module provides the probe contract, the probe registry, the
//! aggregation engine that runs probes concurrently and combines their
//! statuses, and the formatters that render an aggregate report.
//!
//! # Module Structure
//!
//! - `types` - Status levels, probe data payload, probe results and reports
//! - `probe` - The `Probe` trait and the closure adapter
//! - `registry` - Probe registration and snapshots
//! - `engine` - Concurrent execution with timeouts and panic isolation
//! - `format` - JSON and text report formatters
//! - `builtin` - Configuration-driven probe kinds
//! - `tests` - Engine behaviour tests

pub mod builtin;
pub mod engine;
pub mod format;
pub mod probe;
pub mod registry;
pub mod types;

pub use engine::{EngineConfig, HealthEngine, TIMED_OUT};
pub use format::{JsonFormatter, ReportFormatter, TextFormatter, format_duration};
pub use probe::{FnProbe, Probe, probe_fn};
pub use registry::{ProbeRegistration, ProbeRegistry, RegistrySnapshot};
pub use types::{AggregateReport, DataValue, HealthStatus, ProbeData, ProbeOutcome, ProbeResult};
