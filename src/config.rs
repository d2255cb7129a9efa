// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration of the login
//! client. Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use crate::login::{LockoutPolicy, LoginSettings};
use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: backend::BackendConfig,
    pub login: login::LoginConfig,
    pub metrics: metrics::MetricsConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            backend: backend::BackendConfig::from_env()?,
            login: login::LoginConfig::from_env()?,
            metrics: metrics::MetricsConfig::from_env(),
        })
    }
}

// ============================================================
// Backend configuration
// ============================================================

mod backend {
    // ---
    use super::*;

    /// Location of the e-Bios backend serving companies, parameters and tokens.
    #[derive(Debug, Clone)]
    pub struct BackendConfig {
        /// Base URL, e.g. `https://his.example.org`.
        pub base_url: String,

        /// Per-request timeout. Defaults to 10 seconds.
        pub request_timeout: Duration,
    }

    impl BackendConfig {
        /// Builds a [`BackendConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `EBIOS_API_BASE_URL` is missing or not an
        /// http(s) URL.
        pub fn from_env() -> Result<Self> {
            // ---
            let base_url = required_env!("EBIOS_API_BASE_URL");
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                anyhow::bail!("EBIOS_API_BASE_URL must be an http(s) URL, got '{base_url}'");
            }

            let timeout_secs = optional_env_parse!("EBIOS_HTTP_TIMEOUT_SEC", u64, 10);

            Ok(Self {
                base_url,
                request_timeout: Duration::from_secs(timeout_secs),
            })
        }
    }
}
pub use backend::BackendConfig;

// ============================================================
// Login flow configuration
// ============================================================

mod login {
    // ---
    use super::*;

    /// Lockout, expiry and navigation tunables.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LoginConfig {
        /// Consecutive credential failures before lockout. Defaults to 3.
        pub max_failures: u32,

        /// Lockout window. Defaults to 300 seconds.
        pub lockout_duration: Duration,

        /// Expiry warning window in days. Defaults to 30.
        pub expiry_warning_days: u32,

        /// Destination after a successful login. Defaults to `/registrationpage`.
        pub post_login_destination: String,
    }

    impl LoginConfig {
        /// Builds a [`LoginConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if the lockout threshold is zero.
        pub fn from_env() -> Result<Self> {
            // ---
            let max_failures = optional_env_parse!("EBIOS_LOCKOUT_MAX_FAILURES", u32, 3);
            let lockout_secs = optional_env_parse!("EBIOS_LOCKOUT_DURATION_SEC", u64, 300);
            let expiry_warning_days = optional_env_parse!("EBIOS_EXPIRY_WARNING_DAYS", u32, 30);
            let post_login_destination = std::env::var("EBIOS_POST_LOGIN_DESTINATION")
                .unwrap_or_else(|_| crate::login::DEFAULT_POST_LOGIN_DESTINATION.to_string());

            if max_failures == 0 {
                anyhow::bail!("EBIOS_LOCKOUT_MAX_FAILURES must be at least 1");
            }

            Ok(Self {
                max_failures,
                lockout_duration: Duration::from_secs(lockout_secs),
                expiry_warning_days,
                post_login_destination,
            })
        }

        /// Settings consumed by the login screen.
        ///
        /// # Errors
        /// Returns an error if the lockout duration does not fit a `chrono` duration.
        pub fn settings(&self) -> Result<LoginSettings> {
            // ---
            let lockout_duration = chrono::Duration::from_std(self.lockout_duration)?;

            Ok(LoginSettings {
                lockout: LockoutPolicy {
                    max_failures: self.max_failures,
                    lockout_duration,
                },
                expiry_warning_days: self.expiry_warning_days,
                post_login_destination: self.post_login_destination.clone(),
            })
        }
    }
}
pub use login::LoginConfig;

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---

    /// Which metrics backend to install.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsKind {
        Noop,
        Prometheus,
    }

    #[derive(Debug, Clone)]
    pub struct MetricsConfig {
        pub kind: MetricsKind,
    }

    impl MetricsConfig {
        /// `EBIOS_METRICS_TYPE=prom` selects Prometheus; anything else is no-op.
        pub fn from_env() -> Self {
            // ---
            let kind = match std::env::var("EBIOS_METRICS_TYPE").as_deref() {
                Ok("prom") => MetricsKind::Prometheus,
                _ => MetricsKind::Noop,
            };
            Self { kind }
        }
    }
}
pub use metrics::{MetricsConfig, MetricsKind};

// ============================================================
// Tests
// ============================================================
