//! Health status types and probe results
//!
//! This module defines the core value types of the aggregation engine:
//! status levels, the structured data payload a probe may attach, the
//! per-probe result and the aggregate report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Health status levels, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Component is fully operational
    Healthy,
    /// Component is operational but degraded
    Degraded,
    /// Component is not operational
    Unhealthy,
}

impl HealthStatus {
    /// Combine individual statuses by precedence: Unhealthy > Degraded > Healthy.
    ///
    /// An empty input is Healthy.
    pub fn aggregate<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = HealthStatus>,
    {
        statuses
            .into_iter()
            .max()
            .unwrap_or(HealthStatus::Healthy)
    }

    /// Whether a boundary adapter should report a success-class outcome
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Variant name as reported on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::Unhealthy => "Unhealthy",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value in a probe's structured data payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<DataValue>),
    Map(BTreeMap<String, DataValue>),
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Integer(value.into())
    }
}

impl From<u32> for DataValue {
    fn from(value: u32) -> Self {
        DataValue::Integer(value.into())
    }
}

impl From<u64> for DataValue {
    fn from(value: u64) -> Self {
        // Above i64::MAX falls back to a float
        i64::try_from(value)
            .map(DataValue::Integer)
            .unwrap_or(DataValue::Float(value as f64))
    }
}

impl From<usize> for DataValue {
    fn from(value: usize) -> Self {
        DataValue::from(value as u64)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(values: Vec<T>) -> Self {
        DataValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DataValue::Null)
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => f.write_str("null"),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(x) => write!(f, "{}", x),
            DataValue::Text(s) => f.write_str(s),
            DataValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            DataValue::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Structured data attached to a probe result, keyed in stable order
pub type ProbeData = BTreeMap<String, DataValue>;

/// What a probe reports when its check completes
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub status: HealthStatus,
    pub description: Option<String>,
    pub data: ProbeData,
}

impl ProbeOutcome {
    /// Create a healthy outcome
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            description: None,
            data: ProbeData::new(),
        }
    }

    /// Create a degraded outcome
    pub fn degraded<S: Into<String>>(reason: S) -> Self {
        Self {
            status: HealthStatus::Degraded,
            description: Some(reason.into()),
            data: ProbeData::new(),
        }
    }

    /// Create an unhealthy outcome
    pub fn unhealthy<S: Into<String>>(reason: S) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            description: Some(reason.into()),
            data: ProbeData::new(),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach one data entry
    pub fn with_data<K: Into<String>, V: Into<DataValue>>(mut self, key: K, value: V) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Result of running one probe during a query
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Registered probe name
    pub name: String,
    pub status: HealthStatus,
    /// Wall-clock time from invocation to result or timeout
    pub duration: Duration,
    pub description: Option<String>,
    pub data: ProbeData,
}

impl ProbeResult {
    /// Build a result from a completed probe outcome
    pub fn from_outcome(name: impl Into<String>, outcome: ProbeOutcome, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: outcome.status,
            duration,
            description: outcome.description,
            data: outcome.data,
        }
    }

    /// Build an unhealthy result for a probe that failed to produce an outcome
    pub fn failed(name: impl Into<String>, reason: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            duration,
            description: Some(reason.into()),
            data: ProbeData::new(),
        }
    }
}

/// Combined result of all selected probes for one query
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    overall_status: HealthStatus,
    total_duration: Duration,
    entries: Vec<ProbeResult>,
}

impl AggregateReport {
    /// Create a report; the overall status is always derived from the entries
    pub fn new(entries: Vec<ProbeResult>, total_duration: Duration) -> Self {
        let overall_status = HealthStatus::aggregate(entries.iter().map(|e| e.status));
        Self {
            overall_status,
            total_duration,
            entries,
        }
    }

    pub fn overall_status(&self) -> HealthStatus {
        self.overall_status
    }

    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[ProbeResult] {
        &self.entries
    }

    /// Look up an entry by probe name
    pub fn entry(&self, name: &str) -> Option<&ProbeResult> {
        self.entries.iter().find(|e| e.name == name)
    }

    #[inline]
    pub fn is_healthy(&self) -> bool {
        self.overall_status.is_success()
    }
}
