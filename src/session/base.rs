use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::memory_store::MemorySessionStore;
use crate::config::SessionConfig;
use crate::models::Viewer;

/// Holds the currently signed-in viewer, if any.
///
/// The gate only ever reads the session through `current_viewer`; writes happen
/// through `set_viewer` on sign-in and `clear_viewer` on sign-out.
pub trait SessionStore: Send + Sync {
    fn current_viewer(&self) -> Option<Viewer>;
    fn set_viewer(&self, viewer: Viewer);
    fn clear_viewer(&self);
    /// When the current viewer signed in, if anyone is signed in.
    fn signed_in_since(&self) -> Option<DateTime<Utc>>;

    fn has_session(&self) -> bool {
        self.current_viewer().is_some()
    }
}

/// Creates a fresh session store for one visitor from the configured backend.
pub fn create_session_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    match config {
        SessionConfig::Memory => {
            debug!("Creating in-memory session store");
            Arc::new(MemorySessionStore::new())
        }
    }
}
