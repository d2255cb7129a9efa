// src/lib.rs
use anyhow::Result;
use std::sync::Arc;

// Public exports (visible outside this module)
pub mod domain;
pub mod login;

// Internal-only exports (sibling access within this module)
mod config;
mod infrastructure;
mod session;

// Hoist up only the public symbol(s)
pub use session::{token_expiry_millis, IssuedSession, SessionBootstrapper, TokenDecodeError};

pub use config::*;

// Publicly expose the infrastructure adapters and factories
pub use infrastructure::{
    create_noop_metrics, // ---
    create_prom_metrics,
    HttpBackend,
    InMemorySessionStore,
    RecordingNavigator,
    SystemClock,
};

use login::{LoginScreen, LoginServices};

/// Build a login screen wired to the HTTP backend described by `config`.
///
/// The screen gets a fresh in-memory session store, a recording navigator
/// and the system clock. It is not mounted yet.
pub fn create_login_screen(config: &AppConfig) -> Result<LoginScreen> {
    // ---
    let metrics = match config.metrics.kind {
        MetricsKind::Prometheus => create_prom_metrics()?,
        MetricsKind::Noop => create_noop_metrics()?,
    };

    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    let backend = Arc::new(HttpBackend::new(&config.backend)?);

    let services = LoginServices::new(
        backend.clone(),
        backend.clone(),
        backend,
        Arc::new(InMemorySessionStore::new()),
        Arc::new(RecordingNavigator::new()),
        metrics,
        Arc::new(SystemClock),
    );

    Ok(LoginScreen::new(services, config.login.settings()?))
}
