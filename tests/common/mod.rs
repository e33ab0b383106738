//! Common test utilities for healthgate

pub mod assertions;
pub mod probes;

pub use assertions::ReportAssertions;
pub use probes::{CountingProbe, ProbeFactory};
