use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use super::SessionStore;
use crate::models::Viewer;

struct SignedIn {
    viewer: Viewer,
    since: DateTime<Utc>,
}

/// A session store that lives as long as the process does.
#[derive(Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<SignedIn>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        MemorySessionStore {
            current: RwLock::new(None),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn current_viewer(&self) -> Option<Viewer> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.viewer.clone())
    }

    fn set_viewer(&self, viewer: Viewer) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(SignedIn {
            viewer,
            since: Utc::now(),
        });
    }

    fn clear_viewer(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn signed_in_since(&self) -> Option<DateTime<Utc>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.since)
    }
}
