use crate::domain::Metrics;
use std::time::Instant;

/// No-op metrics implementation.
#[derive(Debug, Default)]
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        String::new()
    }
    fn record_login_succeeded(&self) {}
    fn record_login_rejected(&self) {}
    fn record_lockout(&self) {}
    fn record_transport_fault(&self) {}
    fn record_submit_duration(&self, _: Instant) {}
}
