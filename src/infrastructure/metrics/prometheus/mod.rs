mod counters;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use counters::{increment_lockouts, increment_login_outcome, track_submit_duration};
pub(crate) use recorder::{init_metrics, render_metrics};

/// Creates a new Prometheus metrics implementation.
///
/// Installs the global recorder on first use. The rendered text can be
/// obtained through `Metrics::render`.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    init_metrics()?;

    Ok(Arc::new(PrometheusMetrics::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_repeatable_and_renders_counters() {
        let first = create().expect("first create");
        let second = create().expect("second create");

        first.record_login_rejected();
        second.record_lockout();

        let rendered = first.render();
        assert!(rendered.contains("login_attempts_total"));
        assert!(rendered.contains("login_lockouts_total"));
    }
}
