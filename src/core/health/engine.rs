//! Aggregation engine
//!
//! Runs the selected probes concurrently, each under its own timeout and
//! panic boundary, and folds the results into an [`AggregateReport`].

use super::registry::{ProbeRegistration, ProbeRegistry};
use super::types::{AggregateReport, HealthStatus, ProbeResult};
use futures::FutureExt;
use std::any::Any;
use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Description reported for probes that exceed their time budget
pub const TIMED_OUT: &str = "timed out";

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Timeout for probes registered without their own
    pub default_timeout: Duration,
    /// Maximum number of probes running at once within one query
    pub max_concurrency: usize,
    /// Overall deadline for one query, if any
    pub query_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(5),
            max_concurrency: 16,
            query_timeout: None,
        }
    }
}

/// Health aggregation engine
#[derive(Debug, Clone)]
pub struct HealthEngine {
    registry: Arc<ProbeRegistry>,
    config: EngineConfig,
}

impl HealthEngine {
    /// Create an engine over a registry
    pub fn new(registry: Arc<ProbeRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<ProbeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every registered probe
    pub async fn check_all(&self) -> AggregateReport {
        self.run_health_check(None).await
    }

    /// Run the probes selected by `filter` and aggregate their results
    ///
    /// Never fails: probe errors, panics and timeouts all become unhealthy
    /// entries. Entries come back in registration order.
    pub async fn run_health_check(&self, filter: Option<&BTreeSet<String>>) -> AggregateReport {
        let selected = self.registry.list_all().select(filter);
        let started = Instant::now();
        let deadline = self
            .config
            .query_timeout
            .map(|limit| tokio::time::Instant::from_std(started + limit));

        debug!(
            probes = selected.len(),
            filter = ?filter,
            "Running health check"
        );

        let permits = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut tasks = JoinSet::new();
        for (index, registration) in selected.iter().enumerate() {
            let registration = Arc::clone(registration);
            let permits = Arc::clone(&permits);
            let timeout = registration.timeout.unwrap_or(self.config.default_timeout);
            tasks.spawn(async move {
                // The semaphore is never closed
                let _permit = permits.acquire_owned().await.ok();
                (index, run_probe(&registration, timeout).await)
            });
        }

        let mut slots: Vec<Option<ProbeResult>> = vec![None; selected.len()];
        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!("Health check query deadline reached, abandoning remaining probes");
                        tasks.abort_all();
                        break;
                    }
                },
                None => tasks.join_next().await,
            };

            match next {
                Some(Ok((index, result))) => slots[index] = Some(result),
                // Probe panics are caught inside the task, so this is cancellation
                Some(Err(e)) => debug!("Probe task ended without a result: {}", e),
                None => break,
            }
        }

        let elapsed = started.elapsed();
        let entries: Vec<ProbeResult> = slots
            .into_iter()
            .zip(selected.iter())
            .map(|(slot, registration)| {
                slot.unwrap_or_else(|| {
                    warn!(probe = %registration.name, "Health probe did not report before the query deadline");
                    ProbeResult::failed(&registration.name, TIMED_OUT, elapsed)
                })
            })
            .collect();

        let report = AggregateReport::new(entries, started.elapsed());
        debug!(
            status = %report.overall_status(),
            duration_ms = report.total_duration().as_millis() as u64,
            "Health check completed"
        );
        report
    }
}

/// Run one probe under its timeout and panic boundary
async fn run_probe(registration: &ProbeRegistration, timeout: Duration) -> ProbeResult {
    let name = registration.name.as_str();
    let started = Instant::now();
    // Call check() inside the boundary so a panic while building the future is caught too
    let check = AssertUnwindSafe(async { registration.probe.check().await }).catch_unwind();

    let result = match tokio::time::timeout(timeout, check).await {
        Ok(Ok(Ok(outcome))) => {
            let duration = started.elapsed();
            let mut result = ProbeResult::from_outcome(name, outcome, duration);
            if let Some(threshold) = registration.degraded_after {
                apply_slow_threshold(&mut result, threshold);
            }
            result
        }
        Ok(Ok(Err(e))) => ProbeResult::failed(name, e.to_string(), started.elapsed()),
        Ok(Err(panic)) => ProbeResult::failed(
            name,
            format!("probe panicked: {}", panic_message(panic.as_ref())),
            started.elapsed(),
        ),
        Err(_) => ProbeResult::failed(name, TIMED_OUT, started.elapsed()),
    };

    if result.status == HealthStatus::Healthy {
        debug!(probe = name, duration_ms = result.duration.as_millis() as u64, "Health probe passed");
    } else {
        warn!(
            probe = name,
            status = %result.status,
            description = result.description.as_deref().unwrap_or(""),
            "Health probe reported a problem"
        );
    }
    result
}

/// Downgrade a healthy result that took longer than `threshold`
fn apply_slow_threshold(result: &mut ProbeResult, threshold: Duration) {
    if result.status == HealthStatus::Healthy && result.duration > threshold {
        result.status = HealthStatus::Degraded;
        if result.description.is_none() {
            result.description = Some(format!("slow response: {}ms", result.duration.as_millis()));
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
