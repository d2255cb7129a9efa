// Gateway module - controls public API of the login flow
// Modules are private, only exported symbols are public

mod company;
mod error;
mod exchange;
mod expiry;
mod form;
mod rate_limit;
mod screen;
mod services;

// Orchestrator and its wiring
pub use screen::LoginScreen;
pub use services::{LoginServices, LoginSettings, DEFAULT_POST_LOGIN_DESTINATION};

// Screen state
pub use form::FormState;
pub use rate_limit::{LockoutPolicy, LoginAttemptState, RateLimiter};

// Building blocks
pub use company::{auto_selection, display_name, resolve_selection, CompanySelection, NO_COMPANY_PLACEHOLDER};
pub use exchange::{CredentialExchange, TokenResult};
pub use expiry::{
    classify, days_remaining, evaluate, ExpiryError, ExpiryKind, ExpiryNotice, ExpiryStatus,
    NoticeLevel, AMC_PARAMETER_CODE, LICENSE_PARAMETER_CODE,
};

// Errors
pub use error::{
    LoginError, ValidationError, COMPANY_LOAD_FAILED_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
    TRANSPORT_FAULT_MESSAGE,
};
