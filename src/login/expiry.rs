//! AMC support and license expiry evaluation.
//!
//! Dates arrive as `DD/MM/YYYY` strings from the parameter store. The
//! remaining time is measured from `now` to local midnight of the target
//! date, in fractional days, and then classified into a notice.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Parameter code of the AMC support end date.
pub const AMC_PARAMETER_CODE: &str = "AMCSUP";

/// Parameter code of the license end date.
pub const LICENSE_PARAMETER_CODE: &str = "CINLIC";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiryError {
    // ---
    #[error("invalid expiry date '{0}', expected DD/MM/YYYY")]
    InvalidDate(String),

    #[error("parameter {0} returned no rows")]
    MissingParameter(&'static str),
}

/// Which expiry parameter a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryKind {
    // ---
    AmcSupport,
    License,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    // ---
    Warning,

    /// Login must not be attempted.
    Blocking,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryNotice {
    // ---
    pub level: NoticeLevel,
    pub message: String,
}

impl ExpiryNotice {
    // ---
    pub fn is_blocking(&self) -> bool {
        self.level == NoticeLevel::Blocking
    }
}

/// Combined outcome for both expiry parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiryStatus {
    // ---
    pub amc: Option<ExpiryNotice>,
    pub license: Option<ExpiryNotice>,
    pub license_days_remaining: f64,
}

impl ExpiryStatus {
    // ---
    /// Whether the license notice forbids logging in.
    pub fn license_blocks_login(&self) -> bool {
        self.license.as_ref().is_some_and(ExpiryNotice::is_blocking)
    }
}

/// Signed fractional days between `now` and midnight of `date` (`DD/MM/YYYY`).
pub fn days_remaining(date: &str, now: NaiveDateTime) -> Result<f64, ExpiryError> {
    // ---
    let target = NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y")
        .map_err(|_| ExpiryError::InvalidDate(date.to_string()))?
        .and_time(NaiveTime::MIN);

    let delta = target - now;
    Ok(delta.num_milliseconds() as f64 / MILLIS_PER_DAY)
}

/// Classify `days` remaining for one parameter.
///
/// `warning_days` is the width of the warning window (30 by default).
/// Only an expired license blocks login. An expired AMC contract gets its
/// own "has expired" warning instead of a negative day count such as
/// "will expire in -3 day(s)".
pub fn classify(kind: ExpiryKind, days: f64, warning_days: u32) -> Option<ExpiryNotice> {
    // ---
    if days > f64::from(warning_days) {
        return None;
    }

    let notice = match (kind, days < 0.0) {
        (ExpiryKind::License, true) => ExpiryNotice {
            level: NoticeLevel::Blocking,
            message: "Cannot log in. Your License has expired".to_string(),
        },
        (ExpiryKind::AmcSupport, true) => ExpiryNotice {
            level: NoticeLevel::Warning,
            message: "Your AMC support has expired".to_string(),
        },
        (ExpiryKind::License, false) => ExpiryNotice {
            level: NoticeLevel::Warning,
            message: format!("Your License will expire in {} day(s)", days.ceil() as i64),
        },
        (ExpiryKind::AmcSupport, false) => ExpiryNotice {
            level: NoticeLevel::Warning,
            message: format!(
                "Your AMC support will expire in {} day(s)",
                days.ceil() as i64
            ),
        },
    };

    Some(notice)
}

/// Evaluate both expiry dates at `now`.
pub fn evaluate(
    amc_date: &str,
    license_date: &str,
    now: NaiveDateTime,
    warning_days: u32,
) -> Result<ExpiryStatus, ExpiryError> {
    // ---
    let amc_days = days_remaining(amc_date, now)?;
    let license_days = days_remaining(license_date, now)?;

    Ok(ExpiryStatus {
        amc: classify(ExpiryKind::AmcSupport, amc_days, warning_days),
        license: classify(ExpiryKind::License, license_days, warning_days),
        license_days_remaining: license_days,
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn days_remaining_is_fractional_and_signed() {
        // ---
        let now = noon(2024, 3, 1);
        assert_eq!(days_remaining("03/03/2024", now).unwrap(), 1.5);
        assert_eq!(days_remaining("01/03/2024", now).unwrap(), -0.5);
    }

    #[test]
    fn days_remaining_rejects_malformed_dates() {
        // ---
        let now = noon(2024, 3, 1);
        assert_eq!(
            days_remaining("2024-03-01", now),
            Err(ExpiryError::InvalidDate("2024-03-01".to_string()))
        );
        assert!(days_remaining("31/02/2024", now).is_err());
    }

    #[test]
    fn warning_window_is_inclusive_of_thirty_days() {
        // ---
        for days in [0.25, 1.0, 12.4, 29.9, 30.0] {
            let notice = classify(ExpiryKind::AmcSupport, days, 30).expect("warning");
            assert_eq!(notice.level, NoticeLevel::Warning);
        }

        let notice = classify(ExpiryKind::License, 12.4, 30).unwrap();
        assert_eq!(notice.message, "Your License will expire in 13 day(s)");
    }

    #[test]
    fn beyond_window_has_no_notice() {
        // ---
        assert_eq!(classify(ExpiryKind::AmcSupport, 30.01, 30), None);
        assert_eq!(classify(ExpiryKind::License, 400.0, 30), None);
    }

    #[test]
    fn expired_license_blocks() {
        // ---
        let notice = classify(ExpiryKind::License, -0.1, 30).unwrap();
        assert!(notice.is_blocking());
        assert_eq!(notice.message, "Cannot log in. Your License has expired");
    }

    #[test]
    fn expired_amc_only_warns() {
        // ---
        let notice = classify(ExpiryKind::AmcSupport, -5.0, 30).unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Your AMC support has expired");
    }

    #[test]
    fn zero_days_is_a_warning() {
        // ---
        let notice = classify(ExpiryKind::License, 0.0, 30).unwrap();
        assert_eq!(notice.message, "Your License will expire in 0 day(s)");
        assert!(!notice.is_blocking());
    }

    #[test]
    fn evaluate_combines_both_parameters() {
        // ---
        let now = noon(2024, 3, 1);
        let status = evaluate("10/03/2024", "01/01/2024", now, 30).unwrap();

        assert_eq!(
            status.amc.as_ref().map(|n| n.message.as_str()),
            Some("Your AMC support will expire in 9 day(s)")
        );
        assert!(status.license_blocks_login());
        assert!(status.license_days_remaining < 0.0);
    }
}
