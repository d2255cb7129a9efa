//! Prometheus metrics implementation.
//!
//! Implements the `Metrics` trait on top of the global `metrics` crate
//! registry. Counters and histograms are registered on first use, and the
//! handle stored in `recorder.rs` renders them in Prometheus text format.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Empty because all state lives in the global metrics registry.
#[derive(Debug, Default)]
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_login_succeeded(&self) {
        tracing::debug!("Recording login success");
        super::increment_login_outcome("success");
    }

    fn record_login_rejected(&self) {
        tracing::debug!("Recording credential rejection");
        super::increment_login_outcome("rejected");
    }

    fn record_lockout(&self) {
        tracing::debug!("Recording lockout");
        super::increment_lockouts();
    }

    fn record_transport_fault(&self) {
        tracing::debug!("Recording transport fault");
        super::increment_login_outcome("transport_error");
    }

    fn record_submit_duration(&self, start: Instant) {
        super::track_submit_duration(start);
    }
}
