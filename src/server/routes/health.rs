//! Health check endpoint
//!
//! Serves the aggregate report as JSON. The status code is 200 when the
//! overall status is Healthy and 503 otherwise.

use crate::core::health::{AggregateReport, JsonFormatter, ReportFormatter};
use crate::server::state::AppState;
use actix_web::http::StatusCode;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::collections::BTreeSet;
use tracing::{debug, info};
use url::form_urlencoded;

/// Query parameters accepted by the health endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthQuery {
    /// Tags from every `tags` parameter, comma-separated values split
    pub tags: BTreeSet<String>,
}

impl HealthQuery {
    /// Parse a raw query string
    ///
    /// Repeated `tags` keys are merged, blank items and other keys are
    /// ignored. Parsing is lossy and never rejects a request.
    pub fn parse(query_string: &str) -> Self {
        let tags = form_urlencoded::parse(query_string.as_bytes())
            .filter(|(key, _)| key == "tags")
            .flat_map(|(_, value)| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        Self { tags }
    }

    /// The tag filter, or None when no tags were given
    pub fn tag_filter(&self) -> Option<&BTreeSet<String>> {
        if self.tags.is_empty() {
            None
        } else {
            Some(&self.tags)
        }
    }
}

/// Configure the health route at the given path
pub fn configure_routes(cfg: &mut web::ServiceConfig, path: &str) {
    cfg.route(path, web::get().to(health_check));
}

/// Health check endpoint
pub async fn health_check(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    info!("Health check requested");

    let query = HealthQuery::parse(req.query_string());
    let report = state.engine.run_health_check(query.tag_filter()).await;
    debug!(
        status = %report.overall_status(),
        entries = report.entries().len(),
        "Health check finished"
    );

    Ok(report_response(&report, &JsonFormatter::default())?)
}

/// Render a report into an HTTP response
pub fn report_response(
    report: &AggregateReport,
    formatter: &dyn ReportFormatter,
) -> crate::utils::error::Result<HttpResponse> {
    let body = formatter.format(report)?;
    let status = if report.overall_status().is_success() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok(HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, formatter.content_type()))
        .insert_header((CACHE_CONTROL, "no-store, no-cache"))
        .body(body))
}
