use metrics::{counter, histogram};
use std::time::Instant;

/// Increment a login outcome counter.
pub fn increment_login_outcome(outcome: &'static str) {
    counter!("login_attempts_total", "outcome" => outcome).increment(1);
}

/// Increment the lockout counter.
pub fn increment_lockouts() {
    counter!("login_lockouts_total").increment(1);
}

/// Track token exchange latency using a histogram.
pub fn track_submit_duration(start: Instant) {
    let elapsed = start.elapsed();
    histogram!("login_submit_duration_seconds").record(elapsed);
}
