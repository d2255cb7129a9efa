use std::sync::Arc;
use std::time::Instant;

/// Abstraction for login metrics (counters, histograms).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Record a successful login.
    fn record_login_succeeded(&self);

    /// Record a credential rejection by the token issuer.
    fn record_login_rejected(&self);

    /// Record a transition into the locked state.
    fn record_lockout(&self);

    /// Record a transport fault (network, parse, malformed token).
    fn record_transport_fault(&self);

    /// Record how long a submit that reached the token issuer took.
    fn record_submit_duration(&self, start: Instant);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
