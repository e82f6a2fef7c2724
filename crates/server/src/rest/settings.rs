use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use shared_types::{
    AppError, GoogleCredentials, GoogleCredentialsResponse, LlmConfig, LlmConfigResponse,
};

use super::AppState;
use crate::providers::ConnectivityCheck;

/// GET /api/settings/llm
#[utoipa::path(
    get,
    path = "/api/settings/llm",
    responses(
        (status = 200, description = "LLM settings without the API key", body = LlmConfigResponse)
    ),
    tag = "settings"
)]
#[tracing::instrument(skip(state))]
pub async fn get_llm_config(
    State(state): State<AppState>,
) -> Result<Json<LlmConfigResponse>, AppError> {
    Ok(Json(state.store.llm_config().await?.into()))
}

/// PUT /api/settings/llm
#[utoipa::path(
    put,
    path = "/api/settings/llm",
    request_body = LlmConfig,
    responses(
        (status = 200, description = "Settings replaced", body = LlmConfigResponse)
    ),
    tag = "settings"
)]
#[tracing::instrument(skip(state, body))]
pub async fn set_llm_config(
    State(state): State<AppState>,
    Json(body): Json<LlmConfig>,
) -> Result<Json<LlmConfigResponse>, AppError> {
    state.store.set_llm_config(body.clone()).await?;
    Ok(Json(body.into()))
}

/// POST /api/settings/llm/test
///
/// Checks the submitted settings, or the stored ones when the body is empty.
#[utoipa::path(
    post,
    path = "/api/settings/llm/test",
    request_body(content = LlmConfig, description = "Optional; the stored settings are used when empty"),
    responses(
        (status = 204, description = "Connection succeeded"),
        (status = 422, description = "Settings are incomplete", body = AppError)
    ),
    tag = "settings"
)]
#[tracing::instrument(skip(state, body))]
pub async fn test_llm_connection(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let config = if body.is_empty() {
        state.store.llm_config().await?
    } else {
        serde_json::from_slice::<LlmConfig>(&body)
            .map_err(|e| AppError::bad_request(format!("Invalid LLM settings: {e}")))?
    };
    state.providers.test_connection(&config).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/settings/google
#[utoipa::path(
    get,
    path = "/api/settings/google",
    responses(
        (status = 200, description = "Credential status without secrets", body = GoogleCredentialsResponse)
    ),
    tag = "settings"
)]
#[tracing::instrument(skip(state))]
pub async fn get_google_credentials(
    State(state): State<AppState>,
) -> Result<Json<GoogleCredentialsResponse>, AppError> {
    Ok(Json(state.store.google_credentials().await?.into()))
}

/// PUT /api/settings/google
#[utoipa::path(
    put,
    path = "/api/settings/google",
    request_body = GoogleCredentials,
    responses(
        (status = 200, description = "Credentials stored", body = GoogleCredentialsResponse),
        (status = 422, description = "Client id or secret missing", body = AppError)
    ),
    tag = "settings"
)]
#[tracing::instrument(skip(state, body))]
pub async fn set_google_credentials(
    State(state): State<AppState>,
    Json(body): Json<GoogleCredentials>,
) -> Result<Json<GoogleCredentialsResponse>, AppError> {
    state.store.set_google_credentials(Some(body.clone())).await?;
    Ok(Json(Some(body).into()))
}

/// DELETE /api/settings/google
#[utoipa::path(
    delete,
    path = "/api/settings/google",
    responses(
        (status = 204, description = "Credentials cleared")
    ),
    tag = "settings"
)]
#[tracing::instrument(skip(state))]
pub async fn clear_google_credentials(
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.store.set_google_credentials(None).await?;
    Ok(StatusCode::NO_CONTENT)
}
