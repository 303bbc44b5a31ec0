#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use galleryguard::config::{parse_config, ConfigV1};
use galleryguard::routes::create_router;
use galleryguard::startup::build_state;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8081
logging:
  level: "debug"
  format: "json"
gate:
  protected_routes:
    - /gallery/:id
    - /create-gallery
    - /artist/:id
session:
  type: memory
"#;

pub fn load_test_config() -> ConfigV1 {
    parse_config(TEST_CONFIG).expect("Failed to parse test config YAML")
}

pub fn build_app(config: ConfigV1) -> Router {
    create_router(build_state(Arc::new(config)))
}

pub fn request(method: Method, path: &str, visitor: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(visitor) = visitor {
        builder = builder.header("X-Visitor-Id", visitor);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("failed to build request")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should complete")
}

pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn new_visitor(app: &Router) -> String {
    let response = send(app, request(Method::POST, "/visitors", None, None)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = json_body(response).await;
    body["visitor_id"]
        .as_str()
        .expect("visitor_id should be a string")
        .to_string()
}

pub async fn enter(app: &Router, visitor: &str, route: &str) -> Value {
    let encoded: String = url::form_urlencoded::byte_serialize(route.as_bytes()).collect();
    let response = send(
        app,
        request(Method::GET, &format!("/gate?route={}", encoded), Some(visitor), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}
