//! Gate endpoints: route entry, prompt dismissal and retry.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::gate::{AuthGate, Decision, GateSnapshot, PromptState};
use crate::models::VisitorId;
use crate::presenter::links::is_local_path;
use crate::presenter::PromptLinks;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers gate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gate", get(enter_route))
        .route("/gate/state", get(gate_state))
        .route("/gate/dismiss", post(dismiss_prompt))
        .route("/gate/retry", post(retry_prompt))
}

#[derive(Deserialize)]
pub struct EnterQuery {
    pub route: String,
}

/// What the front end should render for a route.
#[derive(Serialize, Deserialize, Debug)]
pub struct GateResponse {
    pub decision: String,
    pub route: Option<String>,
    pub prompt: Option<PromptLinks>,
    pub state: GateSnapshot,
}

/// The prompt's state after a dismiss or retry.
#[derive(Serialize, Deserialize, Debug)]
pub struct PromptResponse {
    pub prompt: Option<PromptLinks>,
    pub state: GateSnapshot,
}

fn on_gate<R>(
    state: &AppState,
    visitor: &VisitorId,
    f: impl FnOnce(&mut AuthGate) -> R,
) -> Result<R, HTTPError> {
    state
        .gates
        .with_gate(visitor, f)
        .ok_or_else(|| HTTPError::unknown_visitor(visitor))
}

async fn enter_route(
    visitor: VisitorId,
    State(state): State<AppState>,
    query: Result<Query<EnterQuery>, QueryRejection>,
) -> Result<Json<GateResponse>, HTTPError> {
    let Query(EnterQuery { route }) =
        query.map_err(|_| HTTPError::bad_request("Missing 'route' query parameter"))?;
    if !is_local_path(&route) {
        return Err(HTTPError::bad_request("Route must be a local path"));
    }

    let (decision, snapshot) = on_gate(&state, &visitor, |gate| {
        let decision = gate.visit(&state.routes, &route);
        (decision, gate.snapshot())
    })?;

    // Suspend leaves the prompt open for the stored intent.
    let prompt_target = match &decision {
        Decision::Suspend => snapshot.intent.as_deref(),
        other => other.prompt_target(),
    };
    let prompt = prompt_target.map(|target| PromptLinks::for_target(target, &state.config.gate));
    Ok(Json(GateResponse {
        decision: decision.kind().to_string(),
        route: decision.prompt_target().map(str::to_string),
        prompt,
        state: snapshot,
    }))
}

async fn gate_state(
    visitor: VisitorId,
    State(state): State<AppState>,
) -> Result<Json<GateSnapshot>, HTTPError> {
    on_gate(&state, &visitor, |gate| gate.snapshot()).map(Json)
}

async fn dismiss_prompt(
    visitor: VisitorId,
    State(state): State<AppState>,
) -> Result<Json<PromptResponse>, HTTPError> {
    let snapshot = on_gate(&state, &visitor, |gate| {
        gate.dismiss();
        gate.snapshot()
    })?;
    Ok(Json(PromptResponse {
        prompt: None,
        state: snapshot,
    }))
}

async fn retry_prompt(
    visitor: VisitorId,
    State(state): State<AppState>,
) -> Result<Json<PromptResponse>, HTTPError> {
    let snapshot = on_gate(&state, &visitor, |gate| {
        gate.retry();
        gate.snapshot()
    })?;
    let prompt = match (&snapshot.prompt, &snapshot.intent) {
        (PromptState::Visible, Some(target)) => {
            Some(PromptLinks::for_target(target, &state.config.gate))
        }
        _ => None,
    };
    Ok(Json(PromptResponse {
        prompt,
        state: snapshot,
    }))
}
