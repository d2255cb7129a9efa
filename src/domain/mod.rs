mod metrics;
mod models;
mod services;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Data exchanged with the collaborators and published on login
pub use models::{ClientParameter, Company, IssuedUser, SessionRecord, TokenRequest, TokenResponse};

// Collaborator contracts
pub use services::{
    Clock, ClockPtr, CompanyDirectory, CompanyDirectoryPtr, Navigator, NavigatorPtr,
    ParameterStore, ParameterStorePtr, SessionStore, SessionStorePtr, TokenIssuer,
    TokenIssuerPtr,
};
