//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Expose a Prometheus-compatible metrics endpoint
//! - Track per-upstream outbound request counts and latency
//!
//! # Metrics
//! - `gateway_upstream_requests_total` (counter): by upstream, method, status
//! - `gateway_upstream_transport_failures_total` (counter): by upstream, method
//! - `gateway_upstream_duration_seconds` (histogram): by upstream
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - The exporter runs its own listener, separate from the gateway port

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on its own listener.
///
/// Failure to start the exporter is logged but never blocks serving traffic.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record a completed outbound request.
pub fn record_upstream_request(upstream: &str, method: &str, status: u16, started: Instant) {
    counter!(
        "gateway_upstream_requests_total",
        "upstream" => upstream.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "gateway_upstream_duration_seconds",
        "upstream" => upstream.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}

/// Record an outbound request that never produced a status (network/DNS/timeout).
pub fn record_transport_failure(upstream: &str, method: &str) {
    counter!(
        "gateway_upstream_transport_failures_total",
        "upstream" => upstream.to_string(),
        "method" => method.to_string()
    )
    .increment(1);
}
