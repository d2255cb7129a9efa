use super::models::{ClientParameter, Company, SessionRecord, TokenRequest, TokenResponse};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of the company list offered on the login screen.
#[async_trait::async_trait]
pub trait CompanyDirectory: Send + Sync {
    // ---
    /// Fetch all companies, in display order.
    async fn get_companies(&self) -> Result<Vec<Company>>;
}

/// Lookup of client parameters such as the AMC and license expiry dates.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    // ---
    /// Fetch the rows for a parameter code. Callers use the first row.
    async fn get_parameter(&self, code: &str) -> Result<Vec<ClientParameter>>;
}

/// Remote service exchanging credentials for a bearer token.
#[async_trait::async_trait]
pub trait TokenIssuer: Send + Sync {
    // ---
    /// One round trip. `Err` means a transport fault, not a rejection.
    async fn generate_token(&self, request: TokenRequest) -> Result<TokenResponse>;
}

/// Process-wide session state. Last writer wins.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    // ---
    /// Replace the current session.
    async fn publish(&self, record: SessionRecord);

    /// The current session, if any.
    async fn current(&self) -> Option<SessionRecord>;

    /// Drop the current session (logout).
    async fn clear(&self);
}

/// Moves the application to a named destination.
pub trait Navigator: Send + Sync {
    // ---
    fn navigate(&self, destination: &str);
}

/// Time source, injectable so lockout and expiry checks are deterministic under test.
pub trait Clock: Send + Sync {
    // ---
    fn now(&self) -> DateTime<Utc>;
}

pub type CompanyDirectoryPtr = Arc<dyn CompanyDirectory>;
pub type ParameterStorePtr = Arc<dyn ParameterStore>;
pub type TokenIssuerPtr = Arc<dyn TokenIssuer>;
pub type SessionStorePtr = Arc<dyn SessionStore>;
pub type NavigatorPtr = Arc<dyn Navigator>;
pub type ClockPtr = Arc<dyn Clock>;
