//! Configured probe definitions

use serde::{Deserialize, Serialize};

/// A probe declared in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Unique probe name
    pub name: String,
    /// What the probe checks
    #[serde(flatten)]
    pub kind: ProbeKind,
    /// Timeout override in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Tags for selective querying
    #[serde(default)]
    pub tags: Vec<String>,
    /// Healthy responses slower than this are reported degraded, in milliseconds
    #[serde(default)]
    pub degraded_after_ms: Option<u64>,
}

/// Built-in probe kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProbeKind {
    /// The process itself
    #[serde(rename = "self")]
    SelfCheck {},
    /// A TCP endpoint accepting connections
    Tcp { address: String },
    /// An HTTP endpoint answering with the expected status
    Http {
        url: String,
        #[serde(default)]
        expected_status: Option<u16>,
    },
}
