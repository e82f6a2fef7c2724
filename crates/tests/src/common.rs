use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use casebook_server::{
    controller::StoreHandle, openapi, providers::MockProviders, rest::AppState,
    store::EntityStore,
};
use serde_json::Value;
use tower::ServiceExt;

/// Build a test router over a fresh in-memory store with instant providers.
///
/// The store handle is returned so tests can inspect state directly.
pub fn test_app() -> (Router, StoreHandle) {
    test_app_with(EntityStore::new())
}

pub fn test_app_with(store: EntityStore) -> (Router, StoreHandle) {
    let handle = StoreHandle::spawn(store);
    let state = AppState::new(handle.clone(), MockProviders::instant());
    (openapi::app_router(state), handle)
}

/// POST JSON to a route.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, json_request("POST", uri, body)).await
}

/// PUT JSON to a route.
pub async fn put_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, json_request("PUT", uri, body)).await
}

/// PATCH JSON to a route.
pub async fn patch_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, json_request("PATCH", uri, body)).await
}

/// GET a route.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, empty_request("GET", uri)).await
}

/// DELETE a route.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, empty_request("DELETE", uri)).await
}

/// POST raw bytes (file uploads).
pub async fn post_bytes(app: &Router, uri: &str, bytes: Vec<u8>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/octet-stream")
        .body(Body::from(bytes))
        .unwrap();
    send(app, req).await
}

/// Create a case through the API and return its id.
pub async fn create_test_case(app: &Router, name: &str, number: &str) -> String {
    let body = serde_json::json!({
        "name": name,
        "number": number,
        "court": "High Court of Hong Kong",
    });
    let (status, resp) = post_json(app, "/api/cases", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED, "create case failed: {resp}");
    resp["id"].as_str().unwrap().to_string()
}

/// Add a timeline event through the API and return it.
pub async fn create_test_event(
    app: &Router,
    case_id: &str,
    title: &str,
    date: &str,
    event_type: &str,
) -> Value {
    let body = serde_json::json!({
        "title": title,
        "date": date,
        "event_type": event_type,
        "case_id": case_id,
    });
    let (status, resp) = post_json(app, "/api/timeline", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED, "create event failed: {resp}");
    resp
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, body)
}
