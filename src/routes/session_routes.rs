//! Session endpoints: recording a completed sign-in, signing out.

use std::cell::RefCell;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Viewer, VisitorId};
use crate::presenter::links::is_local_path;
use crate::presenter::Navigator;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(current_session))
        .route("/session/sign-in", post(sign_in))
        .route("/session/sign-out", post(sign_out))
}

/// A sign-in that the API layer has already verified.
#[derive(Serialize, Deserialize)]
pub struct SignInRequest {
    pub viewer: Viewer,
    /// The `redirect` parameter the sign-in page was opened with, if any.
    #[serde(default)]
    pub redirect: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SignInResponse {
    pub viewer: Viewer,
    /// Where the front end should navigate now; `None` means stay put.
    pub redirect: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub viewer: Option<Viewer>,
    pub signed_in_since: Option<DateTime<Utc>>,
}

/// The redirect travels back in the response body.
#[derive(Default)]
struct ResponseRedirect(RefCell<Option<String>>);

impl Navigator for ResponseRedirect {
    fn navigate(&self, route: &str) {
        self.0.replace(Some(route.to_string()));
    }
}

async fn current_session(
    visitor: VisitorId,
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, HTTPError> {
    let response = state
        .gates
        .with_gate(&visitor, |gate| SessionResponse {
            viewer: gate.session().current_viewer(),
            signed_in_since: gate.session().signed_in_since(),
        })
        .ok_or_else(|| HTTPError::unknown_visitor(&visitor))?;
    Ok(Json(response))
}

async fn sign_in(
    visitor: VisitorId,
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, HTTPError> {
    let navigator = ResponseRedirect::default();
    let viewer = request.viewer.clone();
    state
        .gates
        .with_gate(&visitor, |gate| gate.complete_sign_in(request.viewer, &navigator))
        .ok_or_else(|| HTTPError::unknown_visitor(&visitor))?;

    // The gate's own intent wins; the page parameter only covers sign-ins that
    // did not start from a blocked route on this visitor.
    let redirect = navigator.0.into_inner().or_else(|| {
        request.redirect.filter(|target| {
            let ok = is_local_path(target);
            if !ok {
                warn!(visitor = %visitor, "Ignoring non-local redirect '{}'", target);
            }
            ok
        })
    });

    Ok(Json(SignInResponse { viewer, redirect }))
}

async fn sign_out(visitor: VisitorId, State(state): State<AppState>) -> Result<StatusCode, HTTPError> {
    state
        .gates
        .with_gate(&visitor, |gate| gate.sign_out())
        .ok_or_else(|| HTTPError::unknown_visitor(&visitor))?;
    Ok(StatusCode::NO_CONTENT)
}
