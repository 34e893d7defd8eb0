//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by route, status
//! - `api_request_duration_seconds` (histogram): latency by route
//! - `api_bounded_operations_total` (counter): bounded runs by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    ::metrics::counter!(
        "api_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("api_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_bounded_outcome(outcome: &'static str) {
    ::metrics::counter!("api_bounded_operations_total", "outcome" => outcome).increment(1);
}
