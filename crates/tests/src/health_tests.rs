use axum::http::StatusCode;

use crate::common::{create_test_case, get, test_app};

#[tokio::test]
async fn health_reports_store() {
    let (app, _store) = test_app();
    create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let (status, resp) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["status"], "ok");
    assert_eq!(resp["store"], "running (1 cases)");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _store) = test_app();
    let (status, resp) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["info"]["title"], "Casebook API");
    assert!(resp["paths"]["/api/timeline"].is_object());
}
