//! Probe registry
//!
//! Holds the probes registered at startup, in registration order. Queries
//! read a snapshot, so registrations never block a running health check.

use super::probe::Probe;
use crate::utils::error::{HealthError, Result};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// One registered probe
#[derive(Clone)]
pub struct ProbeRegistration {
    pub(crate) name: String,
    pub(crate) probe: Arc<dyn Probe>,
    /// None means the engine's default timeout applies
    pub(crate) timeout: Option<Duration>,
    pub(crate) tags: BTreeSet<String>,
    /// Healthy outcomes slower than this are reported as degraded
    pub(crate) degraded_after: Option<Duration>,
}

impl ProbeRegistration {
    /// Create a registration with no timeout override and no tags
    pub fn new(name: impl Into<String>, probe: Arc<dyn Probe>) -> Self {
        Self {
            name: name.into(),
            probe,
            timeout: None,
            tags: BTreeSet::new(),
            degraded_after: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_degraded_after(mut self, threshold: Duration) -> Self {
        self.degraded_after = Some(threshold);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn degraded_after(&self) -> Option<Duration> {
        self.degraded_after
    }

    /// Whether this probe is selected by a tag filter
    ///
    /// An absent or empty filter selects every probe.
    pub fn matches(&self, filter: Option<&BTreeSet<String>>) -> bool {
        match filter {
            None => true,
            Some(filter) if filter.is_empty() => true,
            Some(filter) => !self.tags.is_disjoint(filter),
        }
    }
}

impl fmt::Debug for ProbeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeRegistration")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .field("tags", &self.tags)
            .field("degraded_after", &self.degraded_after)
            .finish_non_exhaustive()
    }
}

/// Collection of probes keyed by unique name
#[derive(Debug, Default)]
pub struct ProbeRegistry {
    entries: RwLock<Vec<Arc<ProbeRegistration>>>,
}

impl ProbeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe under a unique name
    pub fn register<I, S>(
        &self,
        name: impl Into<String>,
        probe: Arc<dyn Probe>,
        timeout: Option<Duration>,
        tags: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registration = ProbeRegistration::new(name, probe).with_tags(tags);
        registration.timeout = timeout;
        self.add(registration)
    }

    /// Add a fully built registration
    pub fn add(&self, registration: ProbeRegistration) -> Result<()> {
        if registration.name.trim().is_empty() {
            return Err(HealthError::config("Probe name cannot be empty"));
        }
        if registration.timeout == Some(Duration::ZERO) {
            return Err(HealthError::config(format!(
                "Probe '{}' has a zero timeout",
                registration.name
            )));
        }

        // Check and insert under one write lock so racing registrations cannot both pass
        let mut entries = self.entries.write();
        if entries.iter().any(|e| e.name == registration.name) {
            return Err(HealthError::DuplicateProbe(registration.name));
        }

        info!(
            probe = %registration.name,
            tags = ?registration.tags,
            "Registered health probe"
        );
        entries.push(Arc::new(registration));
        Ok(())
    }

    /// Snapshot of all registrations in registration order
    pub fn list_all(&self) -> RegistrySnapshot {
        let entries = self.entries.read().clone();
        debug!("Taking registry snapshot of {} probes", entries.len());
        RegistrySnapshot { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().iter().any(|e| e.name == name)
    }
}

/// Point-in-time view of the registry
///
/// Iteration is lazy and restartable; registrations made after the snapshot
/// was taken are not visible.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    entries: Vec<Arc<ProbeRegistration>>,
}

impl RegistrySnapshot {
    pub fn iter(&self) -> impl Iterator<Item = &ProbeRegistration> + '_ {
        self.entries.iter().map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registrations selected by a tag filter, still in registration order
    pub(crate) fn select(&self, filter: Option<&BTreeSet<String>>) -> Vec<Arc<ProbeRegistration>> {
        self.entries
            .iter()
            .filter(|e| e.matches(filter))
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a RegistrySnapshot {
    type Item = &'a ProbeRegistration;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<ProbeRegistration>>,
        fn(&'a Arc<ProbeRegistration>) -> &'a ProbeRegistration,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(deref_registration as fn(&'a Arc<ProbeRegistration>) -> &'a ProbeRegistration)
    }
}

fn deref_registration(entry: &Arc<ProbeRegistration>) -> &ProbeRegistration {
    entry
}
