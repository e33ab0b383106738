//! Server builder and composition root
//!
//! Builds the probe registry from configuration, wires it into the engine
//! and hands both to the HTTP server. A registry that fails to build stops
//! startup before anything is served.

use crate::config::Config;
use crate::core::health::builtin::register_configured;
use crate::core::health::{HealthEngine, ProbeRegistration, ProbeRegistry};
use crate::server::server::HttpServer;
use crate::utils::error::{HealthError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    registrations: Vec<ProbeRegistration>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Register an application-provided probe after the configured ones
    pub fn with_probe(mut self, registration: ProbeRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Build the engine without starting a server
    pub fn build_engine(&self) -> Result<HealthEngine> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| HealthError::Config("Configuration is required".to_string()))?;
        build_engine(config, self.registrations.iter().cloned())
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let engine = self.build_engine()?;
        let config = self
            .config
            .ok_or_else(|| HealthError::Config("Configuration is required".to_string()))?;

        Ok(HttpServer::new(&config, engine))
    }
}

/// Build the registry and engine from configuration plus extra registrations
pub fn build_engine<I>(config: &Config, extra: I) -> Result<HealthEngine>
where
    I: IntoIterator<Item = ProbeRegistration>,
{
    let registry = Arc::new(ProbeRegistry::new());
    register_configured(&registry, config.probes())?;
    for registration in extra {
        registry.add(registration)?;
    }

    info!("Registered {} health probes", registry.len());
    Ok(HealthEngine::new(registry, config.health().engine_config()))
}

/// Run the server with the given configuration
pub async fn run_server(config: Config) -> Result<()> {
    let server = ServerBuilder::new().with_config(config.clone()).build()?;
    info!(
        "Server starting at: http://{}{}",
        config.server().address(),
        config.health().path
    );

    server.start().await
}
