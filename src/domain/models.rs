use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A selectable company (hospital unit) as returned by the company directory.
///
/// Identity is the composite key, serialized as `"id,code"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    // ---
    pub composite_key: String,
    pub id: String,
    pub code: String,
    pub display_name: String,
}

impl Company {
    // ---
    /// Builds a company whose composite key is derived from `id` and `code`.
    pub fn new(id: impl Into<String>, code: impl Into<String>, display_name: impl Into<String>) -> Self {
        // ---
        let id = id.into();
        let code = code.into();
        Self {
            composite_key: format!("{id},{code}"),
            id,
            code,
            display_name: display_name.into(),
        }
    }
}

/// One row of a client parameter lookup (`AMCSUP`, `CINLIC`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientParameter {
    // ---
    pub code: String,

    /// Parameter value; for expiry parameters a `DD/MM/YYYY` date.
    pub value: String,
}

/// Credentials and company context sent to the token issuer.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    // ---
    pub username: String,
    pub password: String,
    pub company_id: i64,
    pub company_code: String,
    pub company_name: String,
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("company_id", &self.company_id)
            .field("company_code", &self.company_code)
            .field("company_name", &self.company_name)
            .finish()
    }
}

/// The token issuer's answer. A missing `token` means the credentials were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    // ---
    pub token: Option<String>,
    pub user: IssuedUser,
}

/// User block of a [`TokenResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedUser {
    // ---
    pub user_id: i64,

    /// `"Y"` for administrators.
    pub admin_yn: String,
    pub user_name: String,

    /// Reason for a rejection, when the issuer provides one.
    pub error_message: Option<String>,
}

impl IssuedUser {
    // ---
    pub fn is_admin(&self) -> bool {
        self.admin_yn.eq_ignore_ascii_case("Y")
    }
}

/// Normalized session published after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    // ---
    pub user_id: i64,

    /// Opaque bearer token.
    pub token: String,
    pub is_admin: bool,
    pub user_name: String,
    pub company_id: i64,
    pub company_code: String,
    pub company_name: String,

    /// `exp` claim of the token, in epoch milliseconds.
    pub token_expiry_epoch_millis: i64,
}

impl SessionRecord {
    // ---
    /// Whether the bearer token has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.token_expiry_epoch_millis
    }
}
