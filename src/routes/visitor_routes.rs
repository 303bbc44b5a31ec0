//! Visitor lifecycle endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::models::VisitorId;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers visitor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/visitors", post(create_visitor))
        .route("/visitors/:id", delete(delete_visitor))
}

#[derive(Serialize, Deserialize)]
pub struct CreateVisitorResponse {
    pub visitor_id: VisitorId,
}

async fn create_visitor(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateVisitorResponse>), HTTPError> {
    let visitor_id = state
        .gates
        .create()
        .ok_or_else(|| HTTPError::unavailable("Visitor limit reached"))?;
    Ok((StatusCode::CREATED, Json(CreateVisitorResponse { visitor_id })))
}

async fn delete_visitor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HTTPError> {
    let id: VisitorId = id
        .parse()
        .map_err(|_| HTTPError::bad_request("Invalid visitor id"))?;
    if state.gates.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HTTPError::unknown_visitor(&id))
    }
}
