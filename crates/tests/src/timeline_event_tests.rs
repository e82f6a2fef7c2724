use axum::http::StatusCode;

use crate::common::{
    create_test_case, create_test_event, delete, get, patch_json, post_json, put_json, test_app,
};

#[tokio::test]
async fn create_event_defaults() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let body = serde_json::json!({ "title": "Call with client", "date": "2023-09-01", "case_id": id });
    let (status, event) = post_json(&app, "/api/timeline", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["event_type"], "event");
    assert_eq!(event["date"], "2023-09-01");
}

#[tokio::test]
async fn create_event_blank_title_422() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let body = serde_json::json!({ "title": "  ", "date": "2023-09-01", "case_id": id });
    let (status, resp) = post_json(&app, "/api/timeline", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["field_errors"]["title"], "Event title is required");
}

#[tokio::test]
async fn create_event_for_missing_case_422() {
    let (app, store) = test_app();
    let body = serde_json::json!({
        "title": "Orphan",
        "date": "2023-09-01",
        "case_id": uuid::Uuid::new_v4(),
    });
    let (status, resp) = post_json(&app, "/api/timeline", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["case_id"].is_string());
    assert!(store.timeline_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_event_missing_date_rejected() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let body = serde_json::json!({ "title": "Undated", "case_id": id });
    let (status, _) = post_json(&app, "/api/timeline", &body.to_string()).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn update_event_moves_date() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let event = create_test_event(&app, &id, "Defence due", "2023-11-09", "deadline").await;
    let event_id = event["id"].as_str().unwrap();

    let body = serde_json::json!({ "date": "2023-11-23", "description": "Extended by consent" });
    let (status, updated) = patch_json(&app, &format!("/api/timeline/{event_id}"), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["date"], "2023-11-23");
    assert_eq!(updated["title"], "Defence due");
    assert_eq!(updated["event_type"], "deadline");
}

#[tokio::test]
async fn update_unknown_event_404() {
    let (app, _store) = test_app();
    let (status, _) = patch_json(
        &app,
        &format!("/api/timeline/{}", uuid::Uuid::new_v4()),
        r#"{"title":"Nothing"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_event_then_404() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let event = create_test_event(&app, &id, "Writ issued", "2023-08-21", "filing").await;
    let event_id = event["id"].as_str().unwrap();

    let (status, _) = delete(&app, &format!("/api/timeline/{event_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = delete(&app, &format!("/api/timeline/{event_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replace_collection() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let keep = create_test_event(&app, &id, "Writ issued", "2023-08-21", "filing").await;
    create_test_event(&app, &id, "Scratch", "2023-08-22", "event").await;

    let body = serde_json::json!([keep]);
    let (status, _) = put_json(&app, "/api/timeline", &body.to_string()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, events) = get(&app, "/api/timeline").await;
    pretty_assertions::assert_eq!(events, serde_json::json!([keep]));
}

#[tokio::test]
async fn import_analysis_entries() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let analysis = serde_json::json!({
        "summary": "Claim for breach of trust",
        "claims": [],
        "timeline": [
            { "date": "2023-08-14", "description": "Unauthorised transfer" },
            { "date": "sometime in 2023", "description": "Assets moved" }
        ],
        "weaknesses": [],
        "arguments": [],
    });
    let (status, created) = post_json(
        &app,
        &format!("/api/cases/{id}/timeline/import"),
        &analysis.to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = created.as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["title"], "Unauthorised transfer");
    assert_eq!(created[0]["source"], "Document analysis");
    assert_eq!(created[0]["event_type"], "event");
}

#[tokio::test]
async fn replace_with_orphan_event_422() {
    let (app, store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let keep = create_test_event(&app, &id, "Writ issued", "2023-08-21", "filing").await;

    let orphan = serde_json::json!({
        "id": uuid::Uuid::new_v4(),
        "title": "   ",
        "date": "2023-09-01",
        "event_type": "event",
        "case_id": uuid::Uuid::new_v4(),
    });
    let body = serde_json::json!([keep, orphan]);
    let (status, resp) = put_json(&app, "/api/timeline", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["events[1].case_id"].is_string());
    assert!(resp["field_errors"]["events[1].title"].is_string());

    let events = store.timeline_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Writ issued");
}

#[tokio::test]
async fn replace_with_duplicate_ids_422() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let keep = create_test_event(&app, &id, "Writ issued", "2023-08-21", "filing").await;

    let body = serde_json::json!([keep, keep]);
    let (status, resp) = put_json(&app, "/api/timeline", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["events[1].id"].is_string());
}

#[tokio::test]
async fn import_skips_blank_descriptions() {
    let (app, store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let analysis = serde_json::json!({
        "summary": "Claim for breach of trust",
        "claims": [],
        "timeline": [
            { "date": "2023-01-01", "description": "Writ issued" },
            { "date": "2023-02-01", "description": "   " },
            { "date": "2023-03-01", "description": "Defence" }
        ],
        "weaknesses": [],
        "arguments": [],
    });
    let (status, created) = post_json(
        &app,
        &format!("/api/cases/{id}/timeline/import"),
        &analysis.to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 2);
    assert_eq!(store.timeline_events().await.unwrap().len(), 2);
}
