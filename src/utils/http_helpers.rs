use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::models::VisitorId;
use crate::state::AppState;

/// Header identifying the visitor whose gate a request operates on.
pub const VISITOR_HEADER: &str = "x-visitor-id";

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unknown_visitor(id: &VisitorId) -> Self {
        warn!(visitor = %id, "Request for unknown visitor");
        Self::new(StatusCode::NOT_FOUND, format!("Unknown visitor '{}'", id))
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Extracts the visitor id from the `X-Visitor-Id` header and checks that the
/// visitor is registered.
#[async_trait]
impl FromRequestParts<AppState> for VisitorId {
    type Rejection = HTTPError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, HTTPError> {
        let raw = parts
            .headers
            .get(VISITOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| HTTPError::bad_request("Missing X-Visitor-Id header"))?;

        let id: VisitorId = raw
            .parse()
            .map_err(|_| HTTPError::bad_request("Invalid X-Visitor-Id header"))?;

        if !state.gates.contains(&id) {
            return Err(HTTPError::unknown_visitor(&id));
        }
        Ok(id)
    }
}
