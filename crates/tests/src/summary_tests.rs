use axum::http::StatusCode;
use chrono::{Duration, Utc};

use crate::common::{create_test_case, get, post_json, test_app};

async fn add_hearing(app: &axum::Router, case_id: &str, label: &str, offset_days: i64) {
    let body = serde_json::json!({
        "hearing_type": label,
        "date": Utc::now() + Duration::days(offset_days),
    });
    let (status, _) = post_json(app, &format!("/api/cases/{case_id}/hearings"), &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn next_hearing_is_earliest_upcoming() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    add_hearing(&app, &id, "yesterday", -1).await;
    add_hearing(&app, &id, "in five days", 5).await;
    add_hearing(&app, &id, "tomorrow", 1).await;

    let (status, summary) = get(&app, &format!("/api/cases/{id}/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["hearing_count"], 3);
    assert_eq!(summary["next_hearing"]["hearing_type"], "tomorrow");
}

#[tokio::test]
async fn no_upcoming_hearing_omits_field() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    add_hearing(&app, &id, "last week", -7).await;

    let (_, summary) = get(&app, &format!("/api/cases/{id}/summary")).await;
    assert!(summary.get("next_hearing").is_none());
}

#[tokio::test]
async fn counts_and_pending_documents() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    for (name, status) in [("Claim", "filed"), ("Affirmation", "review"), ("Skeleton", "draft")] {
        let body = serde_json::json!({ "name": name, "status": status });
        post_json(&app, &format!("/api/cases/{id}/documents"), &body.to_string()).await;
    }
    let body = serde_json::json!({ "name": "Andrew Lamb", "role": "plaintiff" });
    post_json(&app, &format!("/api/cases/{id}/parties"), &body.to_string()).await;

    let (_, summary) = get(&app, &format!("/api/cases/{id}/summary")).await;
    pretty_assertions::assert_eq!(
        (
            summary["document_count"].as_u64(),
            summary["pending_document_count"].as_u64(),
            summary["party_count"].as_u64(),
            summary["hearing_count"].as_u64(),
        ),
        (Some(3), Some(2), Some(1), Some(0))
    );
}

#[tokio::test]
async fn summary_for_unknown_case_404() {
    let (app, _store) = test_app();
    let (status, _) = get(&app, &format!("/api/cases/{}/summary", uuid::Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
