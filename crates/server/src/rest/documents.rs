use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared_types::{
    builtin_templates, AppError, DocumentAnalysis, DocumentPayload, DocumentTemplate,
    GenerateDocumentRequest, GeneratedDocument,
};

use super::AppState;
use crate::documents;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyzeParams {
    /// Original file name; its extension decides the media type.
    pub file_name: String,
}

/// GET /api/templates
#[utoipa::path(
    get,
    path = "/api/templates",
    responses(
        (status = 200, description = "Built-in document templates", body = Vec<DocumentTemplate>)
    ),
    tag = "documents"
)]
pub async fn list_templates() -> Json<Vec<DocumentTemplate>> {
    Json(builtin_templates())
}

/// POST /api/documents/generate
#[utoipa::path(
    post,
    path = "/api/documents/generate",
    request_body = GenerateDocumentRequest,
    responses(
        (status = 200, description = "Generated document text", body = GeneratedDocument),
        (status = 404, description = "Unknown template", body = AppError),
        (status = 422, description = "Missing required fields", body = AppError)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state, body))]
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateDocumentRequest>,
) -> Result<Json<GeneratedDocument>, AppError> {
    let doc = documents::generate_document(&state.providers, &body.template_id, &body.fields).await?;
    Ok(Json(doc))
}

/// POST /api/documents/analyze?file_name=claim.pdf
#[utoipa::path(
    post,
    path = "/api/documents/analyze",
    params(AnalyzeParams),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Structured analysis", body = DocumentAnalysis),
        (status = 400, description = "Empty upload or unsupported file type", body = AppError)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state, body))]
pub async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
    body: Bytes,
) -> Result<Json<DocumentAnalysis>, AppError> {
    let payload = DocumentPayload::from_upload(params.file_name, body.to_vec())?;
    Ok(Json(documents::analyze_document(&state.providers, payload).await?))
}
