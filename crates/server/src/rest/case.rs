use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_types::{
    AppError, Case, CaseSummary, CaseUpdate, Document, DocumentStatusUpdate, EmailMonitorConfig,
    Hearing, NewCase, NewDocument, NewEmailMonitor, NewHearing, NewParty, Party,
    SelectCaseRequest,
};

use super::{parse_id, AppState};
use crate::links::{self, CaseLinks};

/// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    responses(
        (status = 200, description = "All cases", body = Vec<Case>)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn list_cases(State(state): State<AppState>) -> Result<Json<Vec<Case>>, AppError> {
    Ok(Json(state.store.list_cases().await?))
}

/// POST /api/cases
#[utoipa::path(
    post,
    path = "/api/cases",
    request_body = NewCase,
    responses(
        (status = 201, description = "Case created", body = Case),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state, body))]
pub async fn create_case(
    State(state): State<AppState>,
    Json(body): Json<NewCase>,
) -> Result<(StatusCode, Json<Case>), AppError> {
    let case = state.store.add_case(body).await?;
    Ok((StatusCode::CREATED, Json(case)))
}

/// GET /api/cases/{id}
#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(("id" = String, Path, description = "Case UUID")),
    responses(
        (status = 200, description = "Case found", body = Case),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Case>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_case(id).await?))
}

/// PATCH /api/cases/{id}
#[utoipa::path(
    patch,
    path = "/api/cases/{id}",
    params(("id" = String, Path, description = "Case UUID")),
    request_body = CaseUpdate,
    responses(
        (status = 200, description = "Case updated", body = Case),
        (status = 404, description = "Not found", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state, body))]
pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CaseUpdate>,
) -> Result<Json<Case>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.update_case(id, body).await?))
}

/// DELETE /api/cases/{id}
///
/// Idempotent: deleting an unknown case also returns 204.
#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    params(("id" = String, Path, description = "Case UUID")),
    responses(
        (status = 204, description = "Case and its timeline events deleted")
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.store.delete_case(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/cases/{id}/summary
#[utoipa::path(
    get,
    path = "/api/cases/{id}/summary",
    params(("id" = String, Path, description = "Case UUID")),
    responses(
        (status = 200, description = "Case statistics", body = CaseSummary),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn case_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CaseSummary>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.case_summary(id).await?))
}

/// GET /api/cases/{id}/links
#[utoipa::path(
    get,
    path = "/api/cases/{id}/links",
    params(("id" = String, Path, description = "Case UUID")),
    responses(
        (status = 200, description = "External links", body = CaseLinks),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn case_links(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CaseLinks>, AppError> {
    let id = parse_id(&id)?;
    let case = state.store.get_case(id).await?;
    Ok(Json(links::case_links(&case)))
}

// ── Selection ───────────────────────────────────────────────────────

/// GET /api/selection
///
/// `null` when nothing is selected or the selected case was deleted.
#[utoipa::path(
    get,
    path = "/api/selection",
    responses(
        (status = 200, description = "Case in context, or null", body = Case)
    ),
    tag = "selection"
)]
#[tracing::instrument(skip(state))]
pub async fn get_selection(
    State(state): State<AppState>,
) -> Result<Json<Option<Case>>, AppError> {
    Ok(Json(state.store.selected_case().await?))
}

/// PUT /api/selection
#[utoipa::path(
    put,
    path = "/api/selection",
    request_body = SelectCaseRequest,
    responses(
        (status = 200, description = "Selection changed; null when cleared", body = Case),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "selection"
)]
#[tracing::instrument(skip(state))]
pub async fn set_selection(
    State(state): State<AppState>,
    Json(body): Json<SelectCaseRequest>,
) -> Result<Json<Option<Case>>, AppError> {
    Ok(Json(state.store.select_existing_case(body.case_id).await?))
}

// ── Case children ───────────────────────────────────────────────────

/// POST /api/cases/{id}/parties
#[utoipa::path(
    post,
    path = "/api/cases/{id}/parties",
    params(("id" = String, Path, description = "Case UUID")),
    request_body = NewParty,
    responses(
        (status = 201, description = "Party added", body = Party),
        (status = 404, description = "Case not found", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state, body))]
pub async fn add_party(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<NewParty>,
) -> Result<(StatusCode, Json<Party>), AppError> {
    let id = parse_id(&id)?;
    let party = state.store.add_party(id, body).await?;
    Ok((StatusCode::CREATED, Json(party)))
}

/// DELETE /api/cases/{id}/parties/{party_id}
#[utoipa::path(
    delete,
    path = "/api/cases/{id}/parties/{party_id}",
    params(
        ("id" = String, Path, description = "Case UUID"),
        ("party_id" = String, Path, description = "Party UUID")
    ),
    responses(
        (status = 204, description = "Party removed"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn remove_party(
    State(state): State<AppState>,
    Path((id, party_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .remove_party(parse_id(&id)?, parse_id(&party_id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/cases/{id}/hearings
#[utoipa::path(
    post,
    path = "/api/cases/{id}/hearings",
    params(("id" = String, Path, description = "Case UUID")),
    request_body = NewHearing,
    responses(
        (status = 201, description = "Hearing scheduled", body = Hearing),
        (status = 404, description = "Case not found", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state, body))]
pub async fn add_hearing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<NewHearing>,
) -> Result<(StatusCode, Json<Hearing>), AppError> {
    let id = parse_id(&id)?;
    let hearing = state.store.add_hearing(id, body).await?;
    Ok((StatusCode::CREATED, Json(hearing)))
}

/// DELETE /api/cases/{id}/hearings/{hearing_id}
#[utoipa::path(
    delete,
    path = "/api/cases/{id}/hearings/{hearing_id}",
    params(
        ("id" = String, Path, description = "Case UUID"),
        ("hearing_id" = String, Path, description = "Hearing UUID")
    ),
    responses(
        (status = 204, description = "Hearing removed"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn remove_hearing(
    State(state): State<AppState>,
    Path((id, hearing_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .remove_hearing(parse_id(&id)?, parse_id(&hearing_id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/cases/{id}/documents
#[utoipa::path(
    post,
    path = "/api/cases/{id}/documents",
    params(("id" = String, Path, description = "Case UUID")),
    request_body = NewDocument,
    responses(
        (status = 201, description = "Document added", body = Document),
        (status = 404, description = "Case not found", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state, body))]
pub async fn add_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<NewDocument>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let id = parse_id(&id)?;
    let document = state.store.add_document(id, body).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// DELETE /api/cases/{id}/documents/{document_id}
#[utoipa::path(
    delete,
    path = "/api/cases/{id}/documents/{document_id}",
    params(
        ("id" = String, Path, description = "Case UUID"),
        ("document_id" = String, Path, description = "Document UUID")
    ),
    responses(
        (status = 204, description = "Document removed"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn remove_document(
    State(state): State<AppState>,
    Path((id, document_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .remove_document(parse_id(&id)?, parse_id(&document_id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/cases/{id}/documents/{document_id}/status
#[utoipa::path(
    patch,
    path = "/api/cases/{id}/documents/{document_id}/status",
    params(
        ("id" = String, Path, description = "Case UUID"),
        ("document_id" = String, Path, description = "Document UUID")
    ),
    request_body = DocumentStatusUpdate,
    responses(
        (status = 200, description = "Status changed", body = Document),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state, body))]
pub async fn set_document_status(
    State(state): State<AppState>,
    Path((id, document_id)): Path<(String, String)>,
    Json(body): Json<DocumentStatusUpdate>,
) -> Result<Json<Document>, AppError> {
    let document = state
        .store
        .set_document_status(parse_id(&id)?, parse_id(&document_id)?, body.status)
        .await?;
    Ok(Json(document))
}

/// POST /api/cases/{id}/monitors
#[utoipa::path(
    post,
    path = "/api/cases/{id}/monitors",
    params(("id" = String, Path, description = "Case UUID")),
    request_body = NewEmailMonitor,
    responses(
        (status = 201, description = "Monitor added", body = EmailMonitorConfig),
        (status = 404, description = "Case not found", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state, body))]
pub async fn add_email_monitor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<NewEmailMonitor>,
) -> Result<(StatusCode, Json<EmailMonitorConfig>), AppError> {
    let id = parse_id(&id)?;
    let monitor = state.store.add_email_monitor(id, body).await?;
    Ok((StatusCode::CREATED, Json(monitor)))
}

/// DELETE /api/cases/{id}/monitors/{monitor_id}
#[utoipa::path(
    delete,
    path = "/api/cases/{id}/monitors/{monitor_id}",
    params(
        ("id" = String, Path, description = "Case UUID"),
        ("monitor_id" = String, Path, description = "Monitor UUID")
    ),
    responses(
        (status = 204, description = "Monitor removed"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(state))]
pub async fn remove_email_monitor(
    State(state): State<AppState>,
    Path((id, monitor_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .remove_email_monitor(parse_id(&id)?, parse_id(&monitor_id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
