use crate::domain::Navigator;
use std::sync::Mutex;

/// Navigator for headless use: logs the destination and remembers the last one.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    last: Mutex<Option<String>>,
}

impl RecordingNavigator {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination of the most recent navigation, if any.
    pub fn last_destination(&self) -> Option<String> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

impl Navigator for RecordingNavigator {
    // ---
    fn navigate(&self, destination: &str) {
        // ---
        tracing::info!("Navigating to {}", destination);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(destination.to_string());
        }
    }
}
