use axum::http::StatusCode;

use crate::common::{get, post_bytes, post_json, test_app};

#[tokio::test]
async fn templates_are_listed() {
    let (app, _store) = test_app();
    let (status, resp) = get(&app, "/api/templates").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = resp
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["statement_of_claim", "witness_statement", "letter_before_action"]
    );
}

#[tokio::test]
async fn generate_statement_of_claim() {
    let (app, _store) = test_app();
    let body = serde_json::json!({
        "template_id": "statement_of_claim",
        "fields": {
            "plaintiff": "Andrew Lamb",
            "defendant": "Liquidity Holdings Ltd",
            "case_number": "HCA 1646/2023",
            "facts": "Funds were transferred without authority.",
            "relief": "An injunction and damages.",
        },
    });
    let (status, resp) = post_json(&app, "/api/documents/generate", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["template_id"], "statement_of_claim");
    assert!(resp["content"].as_str().unwrap().contains("Liquidity Holdings Ltd"));
}

#[tokio::test]
async fn generate_missing_fields_422() {
    let (app, _store) = test_app();
    let body = serde_json::json!({
        "template_id": "statement_of_claim",
        "fields": { "plaintiff": "Andrew Lamb", "defendant": "" },
    });
    let (status, resp) = post_json(&app, "/api/documents/generate", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = resp["field_errors"].as_object().unwrap();
    for field in ["defendant", "case_number", "facts", "relief"] {
        assert!(errors.contains_key(field), "missing error for {field}");
    }
    assert!(!errors.contains_key("plaintiff"));
}

#[tokio::test]
async fn generate_unknown_template_404() {
    let (app, _store) = test_app();
    let body = serde_json::json!({ "template_id": "affidavit" });
    let (status, _) = post_json(&app, "/api/documents/generate", &body.to_string()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_pdf_upload() {
    let (app, _store) = test_app();
    let (status, resp) = post_bytes(
        &app,
        "/api/documents/analyze?file_name=claim.pdf",
        b"%PDF-1.7 statement of claim".to_vec(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(resp["summary"].as_str().is_some());
    assert!(!resp["claims"].as_array().unwrap().is_empty());
    assert!(resp["weaknesses"][0]["severity"].is_string());
}

#[tokio::test]
async fn analyze_rejects_empty_and_unsupported() {
    let (app, _store) = test_app();

    let (status, _) = post_bytes(&app, "/api/documents/analyze?file_name=claim.pdf", Vec::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_bytes(&app, "/api/documents/analyze?file_name=photo.png", b"png".to_vec()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
