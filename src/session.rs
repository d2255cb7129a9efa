//! Session bootstrap for authenticated users.
//!
//! Decodes the `exp` claim out of the issued bearer token and publishes a
//! normalized [`SessionRecord`] to the injected session store.

use crate::domain::{SessionRecord, SessionStorePtr};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

// ---

/// base64url, accepting payloads with or without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// ---

/// Why a bearer token could not be bootstrapped into a session.
#[derive(Debug, Error)]
pub enum TokenDecodeError {
    // ---
    #[error("token has {0} segments, expected 3")]
    SegmentCount(usize),

    #[error("token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token payload has no usable exp claim")]
    MissingExpiry,
}

/// Claims read from the token payload.
#[derive(Debug, Deserialize)]
struct Claims {
    //
    exp: Option<serde_json::Value>,
}

// ---

/// Extract the `exp` claim of a bearer token, in epoch milliseconds.
///
/// # Errors
/// Returns a [`TokenDecodeError`] if the token does not have three
/// segments, the payload is not base64url JSON, or `exp` is missing or
/// not an integer number of seconds.
pub fn token_expiry_millis(token: &str) -> Result<i64, TokenDecodeError> {
    // ---
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenDecodeError::SegmentCount(segments.len()));
    }

    let payload = URL_SAFE_LENIENT.decode(segments[1])?;
    let claims: Claims = serde_json::from_slice(&payload)?;

    claims
        .exp
        .as_ref()
        .and_then(serde_json::Value::as_i64)
        .and_then(|exp| exp.checked_mul(1000))
        .ok_or(TokenDecodeError::MissingExpiry)
}

/// Issued identity plus the company context of the login form.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    // ---
    pub token: String,
    pub user_id: i64,
    pub is_admin: bool,
    pub user_name: String,
    pub company_id: i64,
    pub company_code: String,
    pub company_name: String,
}

/// Builds session records and publishes them to the session store.
#[derive(Clone)]
pub struct SessionBootstrapper {
    store: SessionStorePtr,
}

impl SessionBootstrapper {
    // ---
    pub fn new(store: SessionStorePtr) -> Self {
        Self { store }
    }

    /// Decode the token expiry and publish the resulting session.
    ///
    /// Nothing is published when the token cannot be decoded.
    pub async fn bootstrap(&self, issued: IssuedSession) -> Result<SessionRecord, TokenDecodeError> {
        // ---
        let token_expiry_epoch_millis = token_expiry_millis(&issued.token)?;

        let record = SessionRecord {
            user_id: issued.user_id,
            token: issued.token,
            is_admin: issued.is_admin,
            user_name: issued.user_name,
            company_id: issued.company_id,
            company_code: issued.company_code,
            company_name: issued.company_name,
            token_expiry_epoch_millis,
        };

        self.store.publish(record.clone()).await;
        tracing::info!(
            "Created session for user: {} (company {})",
            record.user_name,
            record.company_code
        );

        Ok(record)
    }
}
