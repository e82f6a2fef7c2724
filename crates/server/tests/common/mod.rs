use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use casebook_server::{
    controller::StoreHandle, openapi, providers::MockProviders, rest::AppState,
    store::EntityStore,
};
use tower::ServiceExt;

/// Router over an empty store plus the handle behind it.
pub fn test_app() -> (Router, StoreHandle) {
    let store = StoreHandle::spawn(EntityStore::new());
    let state = AppState::new(store.clone(), MockProviders::instant());
    (openapi::app_router(state), store)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}
