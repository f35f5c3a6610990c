//! Metrics collection and exposition.
//!
//! # Metrics
//! - `flareproxy_requests_total` (counter): inbound requests by mode, status
//! - `flareproxy_request_duration_seconds` (histogram): inbound latency by mode
//! - `flareproxy_upstream_calls_total` (counter): upstream calls by outcome
//! - `flareproxy_upstream_duration_seconds` (histogram): upstream latency
//! - `flareproxy_fallbacks_total` (counter): HTTPS→HTTP retries in direct mode
//!
//! Recording goes through the `metrics` facade and is a no-op until
//! [`init_metrics`] installs the Prometheus exporter.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Page solves routinely take several seconds.
const SOLVE_LATENCY_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0];

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets(SOLVE_LATENCY_BUCKETS)?
        .install()?;

    describe_counter!("flareproxy_requests_total", "Inbound requests by mode and status");
    describe_histogram!(
        "flareproxy_request_duration_seconds",
        "Inbound request latency by mode"
    );
    describe_counter!("flareproxy_upstream_calls_total", "Upstream calls by outcome");
    describe_histogram!(
        "flareproxy_upstream_duration_seconds",
        "Upstream call latency"
    );
    describe_counter!("flareproxy_fallbacks_total", "HTTPS to HTTP fallback attempts");

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed inbound request.
pub fn record_request(mode: &'static str, status: u16, start: Instant) {
    counter!("flareproxy_requests_total", "mode" => mode, "status" => status.to_string())
        .increment(1);
    histogram!("flareproxy_request_duration_seconds", "mode" => mode)
        .record(start.elapsed().as_secs_f64());
}

/// Record a completed upstream call.
pub fn record_upstream_call(outcome: &'static str, start: Instant) {
    counter!("flareproxy_upstream_calls_total", "outcome" => outcome).increment(1);
    histogram!("flareproxy_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_fallback() {
    counter!("flareproxy_fallbacks_total").increment(1);
}
