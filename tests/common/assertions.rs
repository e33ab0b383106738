//! Custom test assertions for aggregate reports

use healthgate::{AggregateReport, HealthStatus};

/// Assertions for AggregateReport
pub trait ReportAssertions {
    /// Assert entry names appear in exactly this order
    fn assert_entry_order(&self, expected: &[&str]);

    /// Assert the named entry has `status`
    fn assert_entry_status(&self, name: &str, status: HealthStatus);

    /// Assert the named entry has `description`
    fn assert_entry_description(&self, name: &str, description: &str);
}

impl ReportAssertions for AggregateReport {
    fn assert_entry_order(&self, expected: &[&str]) {
        let names: Vec<&str> = self.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, expected, "Unexpected entry order");
    }

    fn assert_entry_status(&self, name: &str, status: HealthStatus) {
        let entry = self
            .entry(name)
            .unwrap_or_else(|| panic!("Expected an entry named {}", name));
        assert_eq!(entry.status, status, "Unexpected status for {}", name);
    }

    fn assert_entry_description(&self, name: &str, description: &str) {
        let entry = self
            .entry(name)
            .unwrap_or_else(|| panic!("Expected an entry named {}", name));
        assert_eq!(
            entry.description.as_deref(),
            Some(description),
            "Unexpected description for {}",
            name
        );
    }
}
