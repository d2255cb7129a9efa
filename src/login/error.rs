//! Error taxonomy for a login submission.
//!
//! The `Display` text of every variant is the message shown on the
//! screen. Transport faults keep their cause as the error source so it
//! can be logged, while the user only sees the generic message.

use thiserror::Error;

/// Message shown for any transport-level fault.
pub const TRANSPORT_FAULT_MESSAGE: &str = "An error occurred during login. Please try again.";

/// Fallback message when the issuer rejects credentials without a reason.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Message shown when the company list cannot be loaded.
pub const COMPANY_LOAD_FAILED_MESSAGE: &str = "Failed to load companies.";

/// Missing input or a blocking license, detected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ---
    #[error("Please select a company.")]
    CompanyNotSelected,

    #[error("Username is required.")]
    UsernameRequired,

    #[error("Password is required.")]
    PasswordRequired,

    #[error("Cannot log in. Your License has expired")]
    LicenseExpired,
}

/// Why a submit did not produce a session.
#[derive(Debug, Error)]
pub enum LoginError {
    // ---
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Account locked. Try again in {remaining_secs} seconds.")]
    RateLimited { remaining_secs: i64 },

    /// The issuer rejected the credentials. Counted toward lockout.
    #[error("{message}")]
    Credential { message: String },

    /// Network, parse or token decode fault. Not counted toward lockout.
    #[error("{}", TRANSPORT_FAULT_MESSAGE)]
    Transport(#[source] anyhow::Error),

    #[error("A login attempt is already in progress.")]
    Busy,

    /// The screen was torn down before the submit started.
    #[error("The login screen has been closed.")]
    Discarded,
}

impl LoginError {
    // ---
    /// Whether this outcome counts as a failed credential attempt.
    pub fn counts_toward_lockout(&self) -> bool {
        matches!(self, LoginError::Credential { .. })
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn validation_messages_match_screen_text() {
        // ---
        let err: LoginError = ValidationError::PasswordRequired.into();
        assert_eq!(err.to_string(), "Password is required.");
        assert_eq!(
            ValidationError::CompanyNotSelected.to_string(),
            "Please select a company."
        );
    }

    #[test]
    fn transport_hides_cause_from_display() {
        // ---
        let err = LoginError::Transport(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), TRANSPORT_FAULT_MESSAGE);
        assert!(!err.counts_toward_lockout());

        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection refused"));
    }

    #[test]
    fn rate_limited_reports_seconds() {
        // ---
        let err = LoginError::RateLimited { remaining_secs: 42 };
        assert_eq!(err.to_string(), "Account locked. Try again in 42 seconds.");
    }

    #[test]
    fn only_credential_errors_count() {
        // ---
        let rejected = LoginError::Credential {
            message: "Account disabled".to_string(),
        };
        assert!(rejected.counts_toward_lockout());
        assert!(!LoginError::Busy.counts_toward_lockout());
        assert!(!LoginError::Discarded.counts_toward_lockout());
        assert!(!LoginError::from(ValidationError::UsernameRequired).counts_toward_lockout());
    }
}
