//! Report formatters
//!
//! Boundary adapters render an [`AggregateReport`] through a
//! [`ReportFormatter`]; the JSON shape is the one served over HTTP.

use super::types::{AggregateReport, DataValue, ProbeResult};
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

/// Renders an aggregate report for a particular transport
pub trait ReportFormatter: Send + Sync {
    /// MIME type of the rendered output
    fn content_type(&self) -> &'static str;

    /// Render the report
    fn format(&self, report: &AggregateReport) -> Result<String>;
}

/// JSON body with camelCase keys and `hh:mm:ss.fffffff` durations
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody<'a> {
    status: &'static str,
    total_duration: String,
    entries: Vec<EntryBody<'a>>,
}

#[derive(Serialize)]
struct EntryBody<'a> {
    name: &'a str,
    status: &'static str,
    duration: String,
    description: Option<&'a str>,
    data: &'a BTreeMap<String, DataValue>,
}

impl<'a> From<&'a ProbeResult> for EntryBody<'a> {
    fn from(entry: &'a ProbeResult) -> Self {
        Self {
            name: &entry.name,
            status: entry.status.as_str(),
            duration: format_duration(entry.duration),
            description: entry.description.as_deref(),
            data: &entry.data,
        }
    }
}

impl ReportFormatter for JsonFormatter {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn format(&self, report: &AggregateReport) -> Result<String> {
        let body = ReportBody {
            status: report.overall_status().as_str(),
            total_duration: format_duration(report.total_duration()),
            entries: report.entries().iter().map(EntryBody::from).collect(),
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&body)?
        } else {
            serde_json::to_string(&body)?
        };
        Ok(rendered)
    }
}

/// Human-readable multi-line summary for terminals
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn format(&self, report: &AggregateReport) -> Result<String> {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "status: {} ({})",
            report.overall_status(),
            format_duration(report.total_duration())
        );

        for entry in report.entries() {
            let _ = write!(
                out,
                "  {}: {} ({}ms)",
                entry.name,
                entry.status,
                entry.duration.as_millis()
            );
            if let Some(description) = &entry.description {
                let _ = write!(out, " - {}", description);
            }
            out.push('\n');

            for (key, value) in &entry.data {
                let _ = writeln!(out, "      {}={}", key, value);
            }
        }

        Ok(out)
    }
}

/// Format a duration as `hh:mm:ss.fffffff` (100ns ticks)
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let ticks = duration.subsec_nanos() / 100;
    format!("{:02}:{:02}:{:02}.{:07}", hours, minutes, seconds, ticks)
}
