//! In-process session state.
//!
//! Holds at most one [`SessionRecord`]. Publishing replaces the current
//! record; there is no lock beyond the inner `RwLock`, so concurrent
//! logins are last-writer-wins.

use crate::domain::{SessionRecord, SessionStore};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    current: Arc<RwLock<Option<SessionRecord>>>,
}

impl InMemorySessionStore {
    // ---
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    // ---
    async fn publish(&self, record: SessionRecord) {
        // ---
        let mut current = self.current.write().await;
        if let Some(previous) = current.as_ref() {
            tracing::debug!("Replacing session of user: {}", previous.user_name);
        }
        *current = Some(record);
    }

    async fn current(&self) -> Option<SessionRecord> {
        self.current.read().await.clone()
    }

    async fn clear(&self) {
        // ---
        if self.current.write().await.take().is_some() {
            tracing::info!("Session cleared");
        }
    }
}
