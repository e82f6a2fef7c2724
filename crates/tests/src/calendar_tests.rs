use axum::http::StatusCode;

use crate::common::{create_test_case, create_test_event, get, test_app};

#[tokio::test]
async fn event_lands_on_exact_day_only() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    create_test_event(&app, &id, "October fifth", "2023-10-05", "event").await;
    create_test_event(&app, &id, "November fifth", "2023-11-05", "event").await;

    let (status, month) = get(&app, "/api/timeline/calendar/2023/10").await;
    assert_eq!(status, StatusCode::OK);

    let days = month["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    let with_events: Vec<(&str, usize)> = days
        .iter()
        .filter(|d| !d["events"].as_array().unwrap().is_empty())
        .map(|d| (d["date"].as_str().unwrap(), d["events"].as_array().unwrap().len()))
        .collect();
    assert_eq!(with_events, vec![("2023-10-05", 1)]);
    assert_eq!(days[4]["events"][0]["title"], "October fifth");
}

#[tokio::test]
async fn leading_blanks_follow_first_weekday() {
    let (app, _store) = test_app();

    // 1 October 2023 was a Sunday; 1 March 2024 a Friday.
    let (_, october) = get(&app, "/api/timeline/calendar/2023/10").await;
    assert_eq!(october["leading_blanks"], 0);
    let (_, march) = get(&app, "/api/timeline/calendar/2024/3").await;
    assert_eq!(march["leading_blanks"], 5);
    assert_eq!(march["days"].as_array().unwrap().len(), 31);
}

#[tokio::test]
async fn leap_february_has_29_days() {
    let (app, _store) = test_app();
    let (_, feb) = get(&app, "/api/timeline/calendar/2024/2").await;
    assert_eq!(feb["days"].as_array().unwrap().len(), 29);
}

#[tokio::test]
async fn calendar_respects_type_filter() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    create_test_event(&app, &id, "Hearing", "2023-10-12", "hearing").await;
    create_test_event(&app, &id, "Order", "2023-10-12", "order").await;

    let (_, month) = get(&app, &format!("/api/timeline/calendar/2023/10?case_id={id}&types=order")).await;
    let cell = &month["days"][11]["events"];
    assert_eq!(cell.as_array().unwrap().len(), 1);
    assert_eq!(cell[0]["title"], "Order");
}

#[tokio::test]
async fn invalid_month_400() {
    let (app, _store) = test_app();
    let (status, resp) = get(&app, "/api/timeline/calendar/2023/13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["kind"], "BadRequest");
}
