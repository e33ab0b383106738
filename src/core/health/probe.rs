//! Probe contract
//!
//! A probe checks one dependency or subsystem. The engine invokes it with no
//! arguments and abandons it by dropping its future, so implementations must
//! not rely on running to completion.

use super::types::ProbeOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// A named unit of work that reports the health of one dependency
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Run the check once
    ///
    /// Returning `Err` marks the probe unhealthy with the error's message as
    /// description.
    async fn check(&self) -> Result<ProbeOutcome>;
}

/// Adapter turning an async closure into a [`Probe`]
pub struct FnProbe<F> {
    check: F,
}

#[async_trait]
impl<F, Fut> Probe for FnProbe<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ProbeOutcome>> + Send + 'static,
{
    async fn check(&self) -> Result<ProbeOutcome> {
        (self.check)().await
    }
}

/// Wrap a closure as a shareable probe
///
/// ```rust
/// use healthgate::core::health::{ProbeOutcome, probe_fn};
///
/// let probe = probe_fn(|| async { Ok(ProbeOutcome::healthy()) });
/// # let _ = probe;
/// ```
pub fn probe_fn<F, Fut>(check: F) -> Arc<dyn Probe>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ProbeOutcome>> + Send + 'static,
{
    Arc::new(FnProbe { check })
}
