//! Application startup and server initialization.
//!
//! This module wires the gate registry, the protected route table and the
//! HTTP routes together, then serves them.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::presenter::TracingPresenter;
use crate::registry::GateRegistry;
use crate::routes;
use crate::state::AppState;

/// Builds the shared state from configuration.
pub fn build_state(config: Arc<ConfigV1>) -> AppState {
    let presenter = Arc::new(TracingPresenter::new(&config.gate));
    let gates = Arc::new(GateRegistry::new(
        config.session.clone(),
        config.gate.max_visitors,
        presenter,
    ));
    let state = AppState::new(config, gates);
    info!(
        protected = ?state.routes.patterns().collect::<Vec<_>>(),
        "Protected routes configured"
    );
    state
}

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error while serving.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config.clone());
    let app = routes::create_router(state);

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
