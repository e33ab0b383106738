//! Built-in probe kinds
//!
//! These cover the checks a deployment can declare in configuration without
//! writing code. Applications embedding the library register their own
//! [`Probe`] implementations alongside or instead of these.

use super::probe::Probe;
use super::registry::{ProbeRegistration, ProbeRegistry};
use super::types::ProbeOutcome;
use crate::config::{ProbeConfig, ProbeKind};
use crate::utils::error::{HealthError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tracing::debug;

/// Reports the process itself as alive, with its uptime
#[derive(Debug)]
pub struct SelfProbe {
    started: Instant,
}

impl SelfProbe {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SelfProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for SelfProbe {
    async fn check(&self) -> Result<ProbeOutcome> {
        Ok(ProbeOutcome::healthy()
            .with_data("uptime_seconds", self.started.elapsed().as_secs())
            .with_data("version", crate::VERSION))
    }
}

/// Checks that a TCP endpoint accepts connections
#[derive(Debug, Clone)]
pub struct TcpProbe {
    address: String,
}

impl TcpProbe {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn check(&self) -> Result<ProbeOutcome> {
        let started = Instant::now();
        let stream = TcpStream::connect(&self.address)
            .await
            .map_err(|e| HealthError::probe_failure(e.to_string()))?;
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| self.address.clone());
        debug!("TCP probe connected to {}", peer);

        Ok(ProbeOutcome::healthy()
            .with_data("address", self.address.as_str())
            .with_data("peer", peer)
            .with_data("connect_ms", started.elapsed().as_millis() as u64))
    }
}

/// Checks that an HTTP endpoint answers with the expected status
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
    expected_status: Option<u16>,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, expected_status: Option<u16>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            expected_status,
        }
    }

    /// Use a preconfigured client (proxy, TLS, default headers)
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self) -> Result<ProbeOutcome> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| HealthError::probe_failure(e.to_string()))?;
        let status = response.status();

        let ok = match self.expected_status {
            Some(expected) => status.as_u16() == expected,
            None => status.is_success(),
        };

        let outcome = if ok {
            ProbeOutcome::healthy()
        } else if status.is_server_error() || self.expected_status.is_some() {
            ProbeOutcome::unhealthy(format!("HTTP {}", status))
        } else {
            // Reachable but answering with a client or redirect status
            ProbeOutcome::degraded(format!("HTTP {}", status))
        };

        Ok(outcome
            .with_data("url", self.url.as_str())
            .with_data("status_code", u32::from(status.as_u16())))
    }
}

/// Build a probe from its configuration
pub fn probe_from_config(kind: &ProbeKind) -> Arc<dyn Probe> {
    match kind {
        ProbeKind::SelfCheck {} => Arc::new(SelfProbe::new()),
        ProbeKind::Tcp { address } => Arc::new(TcpProbe::new(address.clone())),
        ProbeKind::Http {
            url,
            expected_status,
        } => Arc::new(HttpProbe::new(url.clone(), *expected_status)),
    }
}

/// Build a registration from a configured probe
pub fn registration_from_config(config: &ProbeConfig) -> ProbeRegistration {
    let mut registration = ProbeRegistration::new(&config.name, probe_from_config(&config.kind))
        .with_tags(config.tags.iter().cloned());
    if let Some(timeout_ms) = config.timeout_ms {
        registration = registration.with_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(threshold_ms) = config.degraded_after_ms {
        registration = registration.with_degraded_after(Duration::from_millis(threshold_ms));
    }
    registration
}

/// Register every configured probe, failing on the first invalid one
pub fn register_configured(registry: &ProbeRegistry, probes: &[ProbeConfig]) -> Result<()> {
    for probe in probes {
        registry.add(registration_from_config(probe))?;
    }
    Ok(())
}
