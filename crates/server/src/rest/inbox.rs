use axum::{
    extract::{Path, Query, State},
    Json,
};

use shared_types::{AppError, EmailMessage, InboxFilter};

use super::{parse_id, AppState};
use crate::inbox;
use crate::providers::MailProvider;

/// GET /api/inbox
#[utoipa::path(
    get,
    path = "/api/inbox",
    params(InboxFilter),
    responses(
        (status = 200, description = "Messages, newest first", body = Vec<EmailMessage>)
    ),
    tag = "inbox"
)]
#[tracing::instrument(skip(state))]
pub async fn list_inbox(
    State(state): State<AppState>,
    Query(filter): Query<InboxFilter>,
) -> Result<Json<Vec<EmailMessage>>, AppError> {
    let messages = state.providers.list_messages().await?;
    Ok(Json(inbox::filter_messages(&messages, &filter)))
}

/// GET /api/cases/{id}/inbox
#[utoipa::path(
    get,
    path = "/api/cases/{id}/inbox",
    params(
        ("id" = String, Path, description = "Case UUID"),
        InboxFilter
    ),
    responses(
        (status = 200, description = "Messages caught by the case's monitors", body = Vec<EmailMessage>),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "inbox"
)]
#[tracing::instrument(skip(state))]
pub async fn case_inbox(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(filter): Query<InboxFilter>,
) -> Result<Json<Vec<EmailMessage>>, AppError> {
    let case = state.store.get_case(parse_id(&id)?).await?;
    let messages = state.providers.list_messages().await?;
    let matched = inbox::messages_for_case(&case, &messages);
    Ok(Json(inbox::filter_messages(&matched, &filter)))
}
