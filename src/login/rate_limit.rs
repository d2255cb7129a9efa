//! Consecutive-failure lockout for the login screen.
//!
//! The limiter is lazy: an expired lockout is only cleared the next time
//! it is consulted through [`RateLimiter::check`].

use super::error::LoginError;
use chrono::{DateTime, Duration, Utc};

/// Lockout thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    // ---
    /// Failures needed to lock. Defaults to 3.
    pub max_failures: u32,

    /// Length of a lockout window. Defaults to 5 minutes.
    pub lockout_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failures: 3,
            lockout_duration: Duration::minutes(5),
        }
    }
}

/// Attempt bookkeeping. `locked` holds iff `lockout_ends_at` is set and in the future,
/// up to the next [`RateLimiter::check`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginAttemptState {
    // ---
    pub consecutive_failures: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub locked: bool,
    pub lockout_ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct RateLimiter {
    policy: LockoutPolicy,
    state: LoginAttemptState,
}

impl RateLimiter {
    // ---
    pub fn new(policy: LockoutPolicy) -> Self {
        Self {
            policy,
            state: LoginAttemptState::default(),
        }
    }

    pub fn state(&self) -> &LoginAttemptState {
        &self.state
    }

    /// Consult the limiter before a submit.
    ///
    /// Returns [`LoginError::RateLimited`] with the remaining whole seconds
    /// (rounded up) while a lockout is active. An expired lockout is cleared
    /// here, together with the failure count.
    pub fn check(&mut self, now: DateTime<Utc>) -> Result<(), LoginError> {
        // ---
        if !self.state.locked {
            return Ok(());
        }

        match self.state.lockout_ends_at {
            Some(ends_at) if now < ends_at => {
                let remaining_ms = (ends_at - now).num_milliseconds();
                let remaining_secs = (remaining_ms + 999) / 1000;
                Err(LoginError::RateLimited { remaining_secs })
            }
            _ => {
                tracing::debug!(
                    failures = self.state.consecutive_failures,
                    "Lockout expired, resetting failure count"
                );
                self.state.locked = false;
                self.state.lockout_ends_at = None;
                self.state.consecutive_failures = 0;
                Ok(())
            }
        }
    }

    /// Record a credential rejection at `now`.
    ///
    /// Returns `true` when this failure started a lockout.
    pub fn record_failure(&mut self, now: DateTime<Utc>) -> bool {
        // ---
        let failures = self.state.consecutive_failures + 1;
        let locks = failures >= self.policy.max_failures;

        self.state = LoginAttemptState {
            consecutive_failures: failures,
            last_attempt_at: Some(now),
            locked: locks,
            lockout_ends_at: locks.then(|| now + self.policy.lockout_duration),
        };

        locks
    }

    /// Whether a lockout is in force at `now`, without clearing an expired one.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        // ---
        self.state.locked && self.state.lockout_ends_at.is_some_and(|ends_at| now < ends_at)
    }
}
