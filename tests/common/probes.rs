//! Canned probes
//!
//! Real [`Probe`] implementations with fixed behavior, not mocks.

use async_trait::async_trait;
use healthgate::core::health::{Probe, ProbeOutcome, ProbeRegistration, probe_fn};
use healthgate::{HealthError, HealthStatus, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Factory for probe registrations with fixed outcomes
pub struct ProbeFactory;

impl ProbeFactory {
    /// A probe that always reports `status`
    pub fn fixed(name: &str, status: HealthStatus) -> ProbeRegistration {
        ProbeRegistration::new(
            name,
            probe_fn(move || async move {
                Ok(match status {
                    HealthStatus::Healthy => ProbeOutcome::healthy(),
                    HealthStatus::Degraded => ProbeOutcome::degraded("degraded"),
                    HealthStatus::Unhealthy => ProbeOutcome::unhealthy("unhealthy"),
                })
            }),
        )
    }

    /// A probe that reports `status` after `delay`
    pub fn delayed(name: &str, status: HealthStatus, delay: Duration) -> ProbeRegistration {
        ProbeRegistration::new(
            name,
            probe_fn(move || async move {
                tokio::time::sleep(delay).await;
                Ok(ProbeOutcome {
                    status,
                    description: None,
                    data: Default::default(),
                })
            }),
        )
    }

    /// A probe that fails with `message`
    pub fn failing(name: &str, message: &'static str) -> ProbeRegistration {
        ProbeRegistration::new(
            name,
            probe_fn(move || async move { Err(HealthError::probe_failure(message)) }),
        )
    }

    /// A probe that never completes
    pub fn hanging(name: &str) -> ProbeRegistration {
        ProbeRegistration::new(
            name,
            probe_fn(|| async {
                futures::future::pending::<()>().await;
                Ok(ProbeOutcome::healthy())
            }),
        )
    }

    /// A probe that panics
    pub fn panicking(name: &str) -> ProbeRegistration {
        ProbeRegistration::new(
            name,
            probe_fn(|| async {
                if true {
                    panic!("probe exploded");
                }
                Ok(ProbeOutcome::healthy())
            }),
        )
    }
}

/// Healthy probe that counts its invocations
#[derive(Debug, Default)]
pub struct CountingProbe {
    calls: AtomicUsize,
}

impl CountingProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Probe for CountingProbe {
    async fn check(&self) -> Result<ProbeOutcome> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ProbeOutcome::healthy().with_data("calls", call))
    }
}
