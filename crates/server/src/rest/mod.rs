pub mod case;
pub mod documents;
pub mod inbox;
pub mod settings;
pub mod timeline;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use shared_types::AppError;
use uuid::Uuid;

use crate::controller::StoreHandle;
use crate::providers::MockProviders;

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreHandle,
    pub providers: MockProviders,
}

impl AppState {
    pub fn new(store: StoreHandle, providers: MockProviders) -> Self {
        Self { store, providers }
    }
}

/// Parse a path segment as a UUID.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request("Invalid UUID format"))
}

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Cases
        .route("/api/cases", get(case::list_cases).post(case::create_case))
        .route(
            "/api/cases/{id}",
            get(case::get_case)
                .patch(case::update_case)
                .delete(case::delete_case),
        )
        .route("/api/cases/{id}/summary", get(case::case_summary))
        .route("/api/cases/{id}/links", get(case::case_links))
        // Selection
        .route(
            "/api/selection",
            get(case::get_selection).put(case::set_selection),
        )
        // Case children
        .route("/api/cases/{id}/parties", post(case::add_party))
        .route(
            "/api/cases/{id}/parties/{party_id}",
            axum::routing::delete(case::remove_party),
        )
        .route("/api/cases/{id}/hearings", post(case::add_hearing))
        .route(
            "/api/cases/{id}/hearings/{hearing_id}",
            axum::routing::delete(case::remove_hearing),
        )
        .route("/api/cases/{id}/documents", post(case::add_document))
        .route(
            "/api/cases/{id}/documents/{document_id}",
            axum::routing::delete(case::remove_document),
        )
        .route(
            "/api/cases/{id}/documents/{document_id}/status",
            patch(case::set_document_status),
        )
        .route("/api/cases/{id}/monitors", post(case::add_email_monitor))
        .route(
            "/api/cases/{id}/monitors/{monitor_id}",
            axum::routing::delete(case::remove_email_monitor),
        )
        // Timeline
        .route(
            "/api/timeline",
            get(timeline::list_timeline)
                .post(timeline::create_event)
                .put(timeline::replace_events),
        )
        .route("/api/timeline/by-year", get(timeline::timeline_by_year))
        .route(
            "/api/timeline/calendar/{year}/{month}",
            get(timeline::calendar_month),
        )
        .route(
            "/api/timeline/{id}",
            patch(timeline::update_event).delete(timeline::delete_event),
        )
        .route(
            "/api/cases/{id}/timeline/import",
            post(timeline::import_analysis),
        )
        // Documents
        .route("/api/templates", get(documents::list_templates))
        .route("/api/documents/generate", post(documents::generate))
        .route("/api/documents/analyze", post(documents::analyze))
        // Inbox
        .route("/api/inbox", get(inbox::list_inbox))
        .route("/api/cases/{id}/inbox", get(inbox::case_inbox))
        // Settings
        .route(
            "/api/settings/llm",
            get(settings::get_llm_config).put(settings::set_llm_config),
        )
        .route("/api/settings/llm/test", post(settings::test_llm_connection))
        .route(
            "/api/settings/google",
            put(settings::set_google_credentials)
                .get(settings::get_google_credentials)
                .delete(settings::clear_google_credentials),
        )
}
