//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, the protected route table and the per-visitor gates.

use crate::config::ConfigV1;
use crate::gate::ProtectedRoutes;
use crate::registry::GateRegistry;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Routes that require a signed-in viewer.
    pub routes: Arc<ProtectedRoutes>,
    /// One auth gate per visitor.
    pub gates: Arc<GateRegistry>,
}

impl AppState {
    pub fn new(config: Arc<ConfigV1>, gates: Arc<GateRegistry>) -> Self {
        let routes = Arc::new(ProtectedRoutes::from_config(&config.gate));
        AppState {
            config,
            routes,
            gates,
        }
    }
}
