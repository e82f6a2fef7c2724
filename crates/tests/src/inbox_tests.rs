use axum::http::StatusCode;

use crate::common::{create_test_case, get, post_json, test_app};

fn ids(resp: &serde_json::Value) -> Vec<&str> {
    resp.as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn inbox_newest_first() {
    let (app, _store) = test_app();
    let (status, resp) = get(&app, "/api/inbox").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&resp), vec!["msg-1", "msg-3", "msg-2"]);
}

#[tokio::test]
async fn inbox_unread_only() {
    let (app, _store) = test_app();
    let (_, resp) = get(&app, "/api/inbox?unread_only=true").await;
    assert!(resp
        .as_array()
        .unwrap()
        .iter()
        .all(|m| m["is_read"] == false));
}

#[tokio::test]
async fn inbox_query_filter() {
    let (app, _store) = test_app();
    let (_, resp) = get(&app, "/api/inbox?query=prejudice").await;
    assert_eq!(ids(&resp), vec!["msg-2"]);
}

#[tokio::test]
async fn case_inbox_uses_monitors() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let (_, resp) = get(&app, &format!("/api/cases/{id}/inbox")).await;
    assert!(resp.as_array().unwrap().is_empty());

    let monitor = serde_json::json!({ "name": "Registry", "from_domain": "@judiciary.hk" });
    post_json(&app, &format!("/api/cases/{id}/monitors"), &monitor.to_string()).await;

    let (status, resp) = get(&app, &format!("/api/cases/{id}/inbox")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&resp), vec!["msg-1"]);
}

#[tokio::test]
async fn disabled_monitor_catches_nothing() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let monitor = serde_json::json!({
        "name": "Opponent",
        "from_email": "jsmith@smithlaw.hk",
        "enabled": false,
    });
    post_json(&app, &format!("/api/cases/{id}/monitors"), &monitor.to_string()).await;

    let (_, resp) = get(&app, &format!("/api/cases/{id}/inbox")).await;
    assert!(resp.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn case_inbox_unknown_case_404() {
    let (app, _store) = test_app();
    let (status, _) = get(&app, &format!("/api/cases/{}/inbox", uuid::Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
