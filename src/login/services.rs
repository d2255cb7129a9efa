//! Collaborators of the login screen.
//!
//! `LoginServices` is the dependency injection container for one screen
//! instance, in the same spirit as an application state handed to request
//! handlers: built once, cheap to clone, every field behind an `Arc`.

use super::rate_limit::LockoutPolicy;
use crate::domain::{
    ClockPtr, CompanyDirectoryPtr, MetricsPtr, NavigatorPtr, ParameterStorePtr, SessionStorePtr,
    TokenIssuerPtr,
};

/// Default destination after a successful login.
pub const DEFAULT_POST_LOGIN_DESTINATION: &str = "/registrationpage";

#[derive(Clone)]
pub struct LoginServices {
    companies: CompanyDirectoryPtr,
    parameters: ParameterStorePtr,
    issuer: TokenIssuerPtr,
    sessions: SessionStorePtr,
    navigator: NavigatorPtr,
    metrics: MetricsPtr,
    clock: ClockPtr,
}

impl LoginServices {
    // ---

    pub fn new(
        companies: CompanyDirectoryPtr,
        parameters: ParameterStorePtr,
        issuer: TokenIssuerPtr,
        sessions: SessionStorePtr,
        navigator: NavigatorPtr,
        metrics: MetricsPtr,
        clock: ClockPtr,
    ) -> Self {
        // ---
        Self {
            companies,
            parameters,
            issuer,
            sessions,
            navigator,
            metrics,
            clock,
        }
    }

    pub(crate) fn companies(&self) -> &CompanyDirectoryPtr {
        &self.companies
    }

    pub(crate) fn parameters(&self) -> &ParameterStorePtr {
        &self.parameters
    }

    pub(crate) fn issuer(&self) -> &TokenIssuerPtr {
        &self.issuer
    }

    /// The session store successful logins publish to.
    pub fn sessions(&self) -> &SessionStorePtr {
        &self.sessions
    }

    pub(crate) fn navigator(&self) -> &NavigatorPtr {
        &self.navigator
    }

    /// Get a reference to the metrics implementation.
    pub fn metrics(&self) -> &MetricsPtr {
        &self.metrics
    }

    pub(crate) fn clock(&self) -> &ClockPtr {
        &self.clock
    }
}

/// Tunables of the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSettings {
    // ---
    pub lockout: LockoutPolicy,

    /// Width of the expiry warning window, in days.
    pub expiry_warning_days: u32,
    pub post_login_destination: String,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            lockout: LockoutPolicy::default(),
            expiry_warning_days: 30,
            post_login_destination: DEFAULT_POST_LOGIN_DESTINATION.to_string(),
        }
    }
}
