mod clock;
mod http;
pub mod metrics;
mod navigation;
mod session_store;

// Re-export the adapters and factory functions for easy access
pub use clock::SystemClock;
pub use http::HttpBackend;
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use navigation::RecordingNavigator;
pub use session_store::InMemorySessionStore;
