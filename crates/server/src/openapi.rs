use axum::Router;
use shared_types::{
    AnalysisTimelineEntry, AppError, AppErrorKind, Argument, CalendarDay, CalendarMonth, Case,
    CaseStatus, CaseSummary, CaseUpdate, Claim, ClaimType, Document, DocumentAnalysis,
    DocumentStatus, DocumentStatusUpdate, DocumentTemplate, EmailMessage, EmailMonitorConfig,
    GenerateDocumentRequest, GeneratedDocument, GoogleCredentials, GoogleCredentialsResponse,
    Hearing, LlmConfig, LlmConfigResponse, LlmProvider, NewCase, NewDocument, NewEmailMonitor,
    NewHearing, NewParty, NewTimelineEvent, Party, PartyRole, SelectCaseRequest, Severity,
    Strength, TemplateField, TimelineEvent, TimelineEventType, TimelineEventUpdate,
    TimelineYearGroup, Weakness,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::health::{self, HealthResponse};
use crate::links::{CaseLinks, DocumentLink};
use crate::rest::{self, AppState};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Cases
        rest::case::list_cases,
        rest::case::create_case,
        rest::case::get_case,
        rest::case::update_case,
        rest::case::delete_case,
        rest::case::case_summary,
        rest::case::case_links,
        rest::case::get_selection,
        rest::case::set_selection,
        rest::case::add_party,
        rest::case::remove_party,
        rest::case::add_hearing,
        rest::case::remove_hearing,
        rest::case::add_document,
        rest::case::remove_document,
        rest::case::set_document_status,
        rest::case::add_email_monitor,
        rest::case::remove_email_monitor,
        // Timeline
        rest::timeline::list_timeline,
        rest::timeline::timeline_by_year,
        rest::timeline::calendar_month,
        rest::timeline::create_event,
        rest::timeline::replace_events,
        rest::timeline::update_event,
        rest::timeline::delete_event,
        rest::timeline::import_analysis,
        // Documents
        rest::documents::list_templates,
        rest::documents::generate,
        rest::documents::analyze,
        // Inbox
        rest::inbox::list_inbox,
        rest::inbox::case_inbox,
        // Settings
        rest::settings::get_llm_config,
        rest::settings::set_llm_config,
        rest::settings::test_llm_connection,
        rest::settings::get_google_credentials,
        rest::settings::set_google_credentials,
        rest::settings::clear_google_credentials,
        // Health
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        Case, CaseStatus, CaseSummary, CaseUpdate, NewCase, SelectCaseRequest, CaseLinks,
        DocumentLink,
        Party, PartyRole, NewParty,
        Hearing, NewHearing,
        Document, DocumentStatus, NewDocument, DocumentStatusUpdate,
        EmailMonitorConfig, NewEmailMonitor, EmailMessage,
        TimelineEvent, TimelineEventType, NewTimelineEvent, TimelineEventUpdate,
        TimelineYearGroup, CalendarDay, CalendarMonth,
        DocumentAnalysis, Claim, ClaimType, AnalysisTimelineEntry, Weakness, Severity,
        Argument, Strength,
        DocumentTemplate, TemplateField, GenerateDocumentRequest, GeneratedDocument,
        LlmConfig, LlmProvider, LlmConfigResponse, GoogleCredentials, GoogleCredentialsResponse,
        HealthResponse,
    )),
    tags(
        (name = "cases", description = "Case records and their parties, hearings, documents and monitors"),
        (name = "selection", description = "The case currently in context"),
        (name = "timeline", description = "Timeline events and derived views"),
        (name = "documents", description = "Template generation and document analysis"),
        (name = "inbox", description = "Mail summaries and per-case monitoring"),
        (name = "settings", description = "LLM and Google integration settings"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Casebook API",
        description = "Litigation case workspace API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build the full application: REST API at `/api/*`, health at `/health`,
/// and API docs at `/docs`.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
