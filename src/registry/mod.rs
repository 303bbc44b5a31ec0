//! Per-visitor gates.
//!
//! Each visitor owns an `AuthGate` with its own session store. A gate is only
//! ever touched while its mutex is held, so the sub-steps of a sign-in (set the
//! session, hide the prompt, read and clear the intent) cannot interleave with a
//! concurrent route entry for the same visitor.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::gate::AuthGate;
use crate::models::VisitorId;
use crate::presenter::PromptPresenter;
use crate::session::create_session_store;

pub struct GateRegistry {
    session_config: SessionConfig,
    presenter: Arc<dyn PromptPresenter>,
    max_visitors: usize,
    gates: RwLock<HashMap<VisitorId, Arc<Mutex<AuthGate>>>>,
}

impl GateRegistry {
    pub fn new(
        session_config: SessionConfig,
        max_visitors: usize,
        presenter: Arc<dyn PromptPresenter>,
    ) -> Self {
        GateRegistry {
            session_config,
            presenter,
            max_visitors,
            gates: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new visitor with a fresh session and a hidden prompt.
    /// Returns `None` once `max_visitors` are registered.
    pub fn create(&self) -> Option<VisitorId> {
        let mut gates = self.gates.write().unwrap_or_else(PoisonError::into_inner);
        if gates.len() >= self.max_visitors {
            warn!(
                max_visitors = self.max_visitors,
                "Visitor limit reached, refusing registration"
            );
            return None;
        }

        let id = VisitorId::new();
        let gate = AuthGate::new(
            create_session_store(&self.session_config),
            self.presenter.clone(),
        );
        gates.insert(id, Arc::new(Mutex::new(gate)));
        info!(event_name = "visitor.created", visitor = %id, "Visitor registered");
        Some(id)
    }

    pub fn contains(&self, id: &VisitorId) -> bool {
        self.gates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Forgets a visitor. Returns false if it was unknown.
    pub fn remove(&self, id: &VisitorId) -> bool {
        let removed = self
            .gates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            info!(event_name = "visitor.removed", visitor = %id, "Visitor removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.gates.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` against the visitor's gate while holding its lock.
    /// Returns `None` if the visitor is unknown.
    pub fn with_gate<R>(&self, id: &VisitorId, f: impl FnOnce(&mut AuthGate) -> R) -> Option<R> {
        let gate = self
            .gates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned();
        let Some(gate) = gate else {
            debug!(visitor = %id, "No gate for visitor");
            return None;
        };
        let mut guard = gate.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut *guard))
    }
}
