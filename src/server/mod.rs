//! HTTP server implementation
//!
//! This module provides the HTTP boundary adapter for the health engine.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;
