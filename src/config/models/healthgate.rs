//! Main healthgate configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// Main healthgate configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HealthGateConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Health endpoint and engine configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Probes registered at startup, in order
    #[serde(default)]
    pub probes: Vec<ProbeConfig>,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HealthGateConfig {
    /// Merge two configurations, with other taking precedence
    ///
    /// Probes from `other` replace same-named probes in place and are
    /// appended otherwise, so registration order stays stable.
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.health = self.health.merge(other.health);
        self.logging = self.logging.merge(other.logging);

        for probe in other.probes {
            match self.probes.iter_mut().find(|p| p.name == probe.name) {
                Some(existing) => *existing = probe,
                None => self.probes.push(probe),
            }
        }

        self
    }

    /// Validate the configured probes
    pub fn validate_probes(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        for probe in &self.probes {
            if probe.name.trim().is_empty() {
                return Err("Probe name cannot be empty".to_string());
            }
            if !names.insert(probe.name.as_str()) {
                return Err(format!("Duplicate probe name: {}", probe.name));
            }
            if probe.timeout_ms == Some(0) {
                return Err(format!("Probe '{}' timeout cannot be 0", probe.name));
            }

            match &probe.kind {
                ProbeKind::SelfCheck {} => {}
                ProbeKind::Tcp { address } => validate_tcp_address(&probe.name, address)?,
                ProbeKind::Http { url, .. } => validate_http_url(&probe.name, url)?,
            }
        }

        Ok(())
    }
}

fn validate_tcp_address(name: &str, address: &str) -> Result<(), String> {
    let port = address
        .rsplit_once(':')
        .map(|(host, port)| (host, port.parse::<u16>()));
    match port {
        Some((host, Ok(port))) if !host.is_empty() && port != 0 => Ok(()),
        _ => Err(format!(
            "Probe '{}' needs a host:port address, got: {}",
            name, address
        )),
    }
}

fn validate_http_url(name: &str, url: &str) -> Result<(), String> {
    let parsed = Url::parse(url)
        .map_err(|e| format!("Probe '{}' has an invalid URL: {}", name, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "Probe '{}' must use http:// or https://, got: {}",
            name, scheme
        )),
    }
}
