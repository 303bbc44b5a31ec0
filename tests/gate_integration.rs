mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{build_app, enter, json_body, load_test_config, new_visitor, request, send};

fn ada() -> Value {
    json!({ "id": 1, "name": "Ada Lovelace", "username": "ada" })
}

#[tokio::test]
async fn integration_unprotected_route_shows_content() {
    let app = build_app(load_test_config());
    let visitor = new_visitor(&app).await;

    let body = enter(&app, &visitor, "/explore").await;
    assert_eq!(body["decision"], "show_content");
    assert_eq!(body["state"]["prompt"], "hidden");
    assert!(body["prompt"].is_null());
}

#[tokio::test]
async fn integration_protected_route_prompts_with_links() {
    let app = build_app(load_test_config());
    let visitor = new_visitor(&app).await;

    let body = enter(&app, &visitor, "/gallery/42").await;
    assert_eq!(body["decision"], "show_prompt");
    assert_eq!(body["route"], "/gallery/42");
    assert_eq!(body["prompt"]["sign_in"], "/login?redirect=%2Fgallery%2F42");
    assert_eq!(
        body["prompt"]["create_account"],
        "/register?redirect=%2Fgallery%2F42"
    );
    assert_eq!(body["state"]["intent"], "/gallery/42");

    let body = enter(&app, &visitor, "/gallery/42").await;
    assert_eq!(body["decision"], "suspend");
    assert!(body["route"].is_null());
    assert_eq!(body["prompt"]["sign_in"], "/login?redirect=%2Fgallery%2F42");
    assert_eq!(
        body["prompt"]["create_account"],
        "/register?redirect=%2Fgallery%2F42"
    );
}

#[tokio::test]
async fn integration_create_gallery_flow() {
    let app = build_app(load_test_config());
    let visitor = new_visitor(&app).await;

    let body = enter(&app, &visitor, "/create-gallery").await;
    assert_eq!(body["decision"], "show_prompt");

    let response = send(&app, request(Method::POST, "/gate/dismiss", Some(&visitor), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["state"]["prompt"], "dismissed_with_fallback");

    let body = enter(&app, &visitor, "/create-gallery").await;
    assert_eq!(body["decision"], "show_fallback");

    let response = send(&app, request(Method::POST, "/gate/retry", Some(&visitor), None)).await;
    let body: Value = json_body(response).await;
    assert_eq!(body["state"]["prompt"], "visible");
    assert_eq!(body["prompt"]["sign_in"], "/login?redirect=%2Fcreate-gallery");

    let body = enter(&app, &visitor, "/create-gallery").await;
    assert_eq!(body["decision"], "suspend");
    assert_eq!(body["prompt"]["sign_in"], "/login?redirect=%2Fcreate-gallery");

    let response = send(
        &app,
        request(
            Method::POST,
            "/session/sign-in",
            Some(&visitor),
            Some(json!({ "viewer": ada() })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["redirect"], "/create-gallery");
    assert_eq!(body["viewer"]["username"], "ada");

    let body = enter(&app, &visitor, "/create-gallery").await;
    assert_eq!(body["decision"], "show_content");
    assert_eq!(body["state"]["signed_in"], true);
    assert!(body["state"]["intent"].is_null());
}

#[tokio::test]
async fn integration_sign_in_without_intent() {
    let app = build_app(load_test_config());
    let visitor = new_visitor(&app).await;

    let response = send(
        &app,
        request(
            Method::POST,
            "/session/sign-in",
            Some(&visitor),
            Some(json!({ "viewer": ada() })),
        ),
    )
    .await;
    let body: Value = json_body(response).await;
    assert!(body["redirect"].is_null());

    let other = new_visitor(&app).await;
    let response = send(
        &app,
        request(
            Method::POST,
            "/session/sign-in",
            Some(&other),
            Some(json!({ "viewer": ada(), "redirect": "/gallery/7" })),
        ),
    )
    .await;
    let body: Value = json_body(response).await;
    assert_eq!(body["redirect"], "/gallery/7");

    let third = new_visitor(&app).await;
    let response = send(
        &app,
        request(
            Method::POST,
            "/session/sign-in",
            Some(&third),
            Some(json!({ "viewer": ada(), "redirect": "https://evil.example" })),
        ),
    )
    .await;
    let body: Value = json_body(response).await;
    assert!(body["redirect"].is_null());
}

#[tokio::test]
async fn integration_sign_out_gates_again() {
    let app = build_app(load_test_config());
    let visitor = new_visitor(&app).await;

    send(
        &app,
        request(
            Method::POST,
            "/session/sign-in",
            Some(&visitor),
            Some(json!({ "viewer": ada() })),
        ),
    )
    .await;

    let response = send(&app, request(Method::GET, "/session", Some(&visitor), None)).await;
    let body: Value = json_body(response).await;
    assert_eq!(body["viewer"]["name"], "Ada Lovelace");
    let since = body["signed_in_since"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(since).is_ok());

    let response = send(&app, request(Method::POST, "/session/sign-out", Some(&visitor), None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request(Method::GET, "/session", Some(&visitor), None)).await;
    let body: Value = json_body(response).await;
    assert!(body["viewer"].is_null());
    assert!(body["signed_in_since"].is_null());

    let body = enter(&app, &visitor, "/artist/3").await;
    assert_eq!(body["decision"], "show_prompt");
}

#[tokio::test]
async fn integration_route_change_restarts_prompt() {
    let app = build_app(load_test_config());
    let visitor = new_visitor(&app).await;

    enter(&app, &visitor, "/gallery/1").await;
    send(&app, request(Method::POST, "/gate/dismiss", Some(&visitor), None)).await;

    let body = enter(&app, &visitor, "/gallery/2").await;
    assert_eq!(body["decision"], "show_prompt");
    assert_eq!(body["state"]["intent"], "/gallery/2");
    assert_eq!(body["state"]["prompt"], "visible");
}

#[tokio::test]
async fn integration_visitor_errors() {
    let app = build_app(load_test_config());

    let response = send(&app, request(Method::GET, "/gate?route=/gallery/1", None, None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(Method::GET, "/gate/state", Some("not-a-uuid"), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(
            Method::GET,
            "/gate/state",
            Some("6f1c3a58-2b1f-4a53-9d41-3c1c2b9a7e10"),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Unknown visitor"));

    let visitor = new_visitor(&app).await;
    let response = send(&app, request(Method::GET, "/gate", Some(&visitor), None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(Method::GET, "/gate?route=gallery", Some(&visitor), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn integration_delete_visitor() {
    let app = build_app(load_test_config());
    let visitor = new_visitor(&app).await;

    let path = format!("/visitors/{}", visitor);
    let response = send(&app, request(Method::DELETE, &path, None, None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request(Method::DELETE, &path, None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, request(Method::GET, "/gate/state", Some(&visitor), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn integration_visitor_limit() {
    let mut config = load_test_config();
    config.gate.max_visitors = 2;
    let app = build_app(config);

    let first = new_visitor(&app).await;
    new_visitor(&app).await;

    let response = send(&app, request(Method::POST, "/visitors", None, None)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = json_body(response).await;
    assert_eq!(body["error"], "Visitor limit reached");

    let path = format!("/visitors/{}", first);
    send(&app, request(Method::DELETE, &path, None, None)).await;
    new_visitor(&app).await;
}

#[tokio::test]
async fn integration_health() {
    let app = build_app(load_test_config());
    let response = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
