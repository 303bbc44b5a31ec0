//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! visitor lifecycle, gate decisions, sessions, and health checks.

pub mod gate_routes;
mod health_routes;
pub mod session_routes;
pub mod visitor_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(visitor_routes::routes())
        .merge(gate_routes::routes())
        .merge(session_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}
