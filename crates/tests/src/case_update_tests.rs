use axum::http::StatusCode;

use crate::common::{create_test_case, get, patch_json, test_app};

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let (_, before) = get(&app, &format!("/api/cases/{id}")).await;

    let body = serde_json::json!({ "status": "closed" });
    let (status, after) = patch_json(&app, &format!("/api/cases/{id}"), &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["status"], "closed");
    assert_eq!(after["name"], before["name"]);
    assert_eq!(after["number"], before["number"]);
    assert_eq!(after["court"], before["court"]);
    assert_eq!(after["created_at"], before["created_at"]);
}

#[tokio::test]
async fn update_advances_updated_at() {
    let (app, store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let uuid = uuid::Uuid::parse_str(&id).unwrap();
    let before = store.get_case(uuid).await.unwrap();

    let body = serde_json::json!({ "name": "Lamb v. Liquidity Holdings" });
    let (status, _) = patch_json(&app, &format!("/api/cases/{id}"), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let after = store.get_case(uuid).await.unwrap();
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.name, "Lamb v. Liquidity Holdings");
}

#[tokio::test]
async fn empty_update_is_a_no_op_merge() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let (_, before) = get(&app, &format!("/api/cases/{id}")).await;

    let (status, after) = patch_json(&app, &format!("/api/cases/{id}"), "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["name"], before["name"]);
    assert_eq!(after["status"], before["status"]);
}

#[tokio::test]
async fn update_blank_court_422() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let body = serde_json::json!({ "court": "  " });
    let (status, resp) = patch_json(&app, &format!("/api/cases/{id}"), &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["field_errors"]["court"], "Court is required");
}

#[tokio::test]
async fn update_unknown_case_404() {
    let (app, _store) = test_app();
    let body = serde_json::json!({ "status": "closed" });
    let (status, resp) = patch_json(
        &app,
        &format!("/api/cases/{}", uuid::Uuid::new_v4()),
        &body.to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["kind"], "NotFound");
}

#[tokio::test]
async fn update_sets_external_references() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let body = serde_json::json!({ "drive_folder_id": "folder-abc", "sheet_id": "sheet-xyz" });
    let (status, resp) = patch_json(&app, &format!("/api/cases/{id}"), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["drive_folder_id"], "folder-abc");

    let (_, links) = get(&app, &format!("/api/cases/{id}/links")).await;
    assert_eq!(
        links["drive_folder_url"],
        "https://drive.google.com/drive/folders/folder-abc"
    );
    assert_eq!(
        links["spreadsheet_url"],
        "https://docs.google.com/spreadsheets/d/sheet-xyz"
    );
}

#[tokio::test]
async fn update_null_clears_external_reference() {
    let (app, _store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;
    let body = serde_json::json!({ "drive_folder_id": "folder-abc", "sheet_id": "sheet-xyz" });
    patch_json(&app, &format!("/api/cases/{id}"), &body.to_string()).await;

    let (status, resp) =
        patch_json(&app, &format!("/api/cases/{id}"), r#"{"drive_folder_id":null}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(resp["drive_folder_id"].is_null());
    assert_eq!(resp["sheet_id"], "sheet-xyz");
}

#[tokio::test]
async fn update_with_invalid_monitor_and_party_422() {
    let (app, store) = test_app();
    let id = create_test_case(&app, "Lamb v. Liquidity", "HCA 1646/2023").await;

    let body = serde_json::json!({
        "email_monitors": [{
            "id": uuid::Uuid::new_v4(),
            "name": " ",
            "from_email": "not-an-address",
            "enabled": true,
        }],
        "parties": [{
            "id": uuid::Uuid::nil(),
            "name": "",
            "role": "plaintiff",
            "contact_emails": ["junk"],
        }],
    });
    let (status, resp) = patch_json(&app, &format!("/api/cases/{id}"), &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = resp["field_errors"].as_object().unwrap();
    assert!(errors.contains_key("email_monitors[0].from_email"));
    assert!(errors.contains_key("email_monitors[0].name"));
    assert!(errors.contains_key("parties[0].id"));
    assert!(errors.contains_key("parties[0].contact_emails[0]"));

    let case = store.get_case(id.parse().unwrap()).await.unwrap();
    assert!(case.email_monitors.is_empty());
    assert!(case.parties.is_empty());
}
