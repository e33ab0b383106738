//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::health::HealthEngine;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{HealthError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server around an engine
    pub fn new(config: &Config, engine: HealthEngine) -> Self {
        info!(
            "Creating HTTP server with {} registered probes",
            engine.registry().len()
        );

        Self {
            config: config.gateway.server.clone(),
            state: AppState::new(config.clone(), engine),
        }
    }

    /// Configure the application: shared state plus the single health route
    pub fn configure_app(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
        let path = state.config.health().path.clone();
        cfg.app_data(state);
        routes::health::configure_routes(cfg, &path);
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || {
            let state = state.clone();
            App::new()
                .wrap(TracingLogger::default())
                .wrap(DefaultHeaders::new().add(("Server", "healthgate")))
                .configure(move |cfg| Self::configure_app(cfg, state))
        })
        .workers(workers)
        .bind(&bind_addr)
        .map_err(|e| HealthError::server(format!("Failed to bind to {}: {}", bind_addr, e)))?
        .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| HealthError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
