use axum::http::StatusCode;

use crate::common::{create_test_case, create_test_event, get, test_app};

fn titles(resp: &serde_json::Value) -> Vec<&str> {
    resp.as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn timeline_is_chronological() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    create_test_event(&app, &id, "Defence due", "2023-11-09", "deadline").await;
    create_test_event(&app, &id, "Writ issued", "2023-08-21", "filing").await;
    create_test_event(&app, &id, "Injunction granted", "2023-10-12", "order").await;

    let (status, resp) = get(&app, "/api/timeline").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        titles(&resp),
        vec!["Writ issued", "Injunction granted", "Defence due"]
    );
}

#[tokio::test]
async fn equal_dates_keep_insertion_order() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    create_test_event(&app, &id, "Hearing", "2023-10-12", "hearing").await;
    create_test_event(&app, &id, "Earlier", "2023-10-01", "event").await;
    create_test_event(&app, &id, "Order", "2023-10-12", "order").await;
    create_test_event(&app, &id, "Costs", "2023-10-12", "order").await;

    let (_, resp) = get(&app, "/api/timeline").await;
    assert_eq!(titles(&resp), vec!["Earlier", "Hearing", "Order", "Costs"]);
}

#[tokio::test]
async fn filter_by_case() {
    let (app, _store) = test_app();
    let lamb = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let chan = create_test_case(&app, "Chan v. Wong", "HCA 12/2024").await;
    create_test_event(&app, &lamb, "Writ issued", "2023-08-21", "filing").await;
    create_test_event(&app, &chan, "Writ issued", "2024-01-03", "filing").await;

    let (_, resp) = get(&app, &format!("/api/timeline?case_id={chan}")).await;
    let events = resp.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["case_id"], chan.as_str());
}

#[tokio::test]
async fn empty_type_filter_shows_all_types() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    create_test_event(&app, &id, "Writ issued", "2023-08-21", "filing").await;
    create_test_event(&app, &id, "Injunction granted", "2023-10-12", "order").await;

    let (_, resp) = get(&app, &format!("/api/timeline?case_id={id}&types=")).await;
    assert_eq!(resp.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn multiple_types_are_inclusive() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    create_test_event(&app, &id, "Writ issued", "2023-08-21", "filing").await;
    create_test_event(&app, &id, "Injunction granted", "2023-10-12", "order").await;
    create_test_event(&app, &id, "Defence due", "2023-11-09", "deadline").await;

    let (_, resp) = get(&app, "/api/timeline?types=order,deadline").await;
    assert_eq!(titles(&resp), vec!["Injunction granted", "Defence due"]);
}

#[tokio::test]
async fn unknown_type_400() {
    let (app, _store) = test_app();
    let (status, resp) = get(&app, "/api/timeline?types=memo").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["message"].as_str().unwrap().contains("memo"));
}

#[tokio::test]
async fn group_by_year_newest_first() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    create_test_event(&app, &id, "Writ issued", "2023-08-21", "filing").await;
    create_test_event(&app, &id, "Trial", "2024-05-06", "hearing").await;
    create_test_event(&app, &id, "Defence due", "2023-11-09", "deadline").await;

    let (status, resp) = get(&app, "/api/timeline/by-year").await;
    assert_eq!(status, StatusCode::OK);
    let groups = resp.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["year"], 2024);
    assert_eq!(groups[1]["year"], 2023);
    assert_eq!(titles(&groups[1]["events"]), vec!["Writ issued", "Defence due"]);
}
