use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use shared_types::{
    AppError, CalendarMonth, DocumentAnalysis, NewTimelineEvent, TimelineEvent,
    TimelineEventUpdate, TimelineParams, TimelineQuery, TimelineYearGroup,
};

use super::{parse_id, AppState};
use crate::documents;

/// GET /api/timeline
#[utoipa::path(
    get,
    path = "/api/timeline",
    params(TimelineParams),
    responses(
        (status = 200, description = "Events in chronological order", body = Vec<TimelineEvent>),
        (status = 400, description = "Unknown event type", body = AppError)
    ),
    tag = "timeline"
)]
#[tracing::instrument(skip(state))]
pub async fn list_timeline(
    State(state): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> Result<Json<Vec<TimelineEvent>>, AppError> {
    let query = TimelineQuery::try_from(params)?;
    Ok(Json(state.store.timeline(query).await?))
}

/// GET /api/timeline/by-year
#[utoipa::path(
    get,
    path = "/api/timeline/by-year",
    params(TimelineParams),
    responses(
        (status = 200, description = "Events grouped by year, newest year first", body = Vec<TimelineYearGroup>),
        (status = 400, description = "Unknown event type", body = AppError)
    ),
    tag = "timeline"
)]
#[tracing::instrument(skip(state))]
pub async fn timeline_by_year(
    State(state): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> Result<Json<Vec<TimelineYearGroup>>, AppError> {
    let query = TimelineQuery::try_from(params)?;
    Ok(Json(state.store.timeline_by_year(query).await?))
}

/// GET /api/timeline/calendar/{year}/{month}
#[utoipa::path(
    get,
    path = "/api/timeline/calendar/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Month, 1-12"),
        TimelineParams
    ),
    responses(
        (status = 200, description = "Month grid", body = CalendarMonth),
        (status = 400, description = "Invalid month or event type", body = AppError)
    ),
    tag = "timeline"
)]
#[tracing::instrument(skip(state))]
pub async fn calendar_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    Query(params): Query<TimelineParams>,
) -> Result<Json<CalendarMonth>, AppError> {
    let query = TimelineQuery::try_from(params)?;
    Ok(Json(state.store.calendar_month(query, year, month).await?))
}

/// POST /api/timeline
#[utoipa::path(
    post,
    path = "/api/timeline",
    request_body = NewTimelineEvent,
    responses(
        (status = 201, description = "Event added", body = TimelineEvent),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "timeline"
)]
#[tracing::instrument(skip(state, body))]
pub async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<NewTimelineEvent>,
) -> Result<(StatusCode, Json<TimelineEvent>), AppError> {
    let event = state.store.add_timeline_event(body).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/timeline
///
/// Replaces the whole collection. Nothing changes if any event is invalid.
#[utoipa::path(
    put,
    path = "/api/timeline",
    request_body = Vec<TimelineEvent>,
    responses(
        (status = 204, description = "Collection replaced"),
        (status = 422, description = "Blank title, duplicate id or unknown case", body = AppError)
    ),
    tag = "timeline"
)]
#[tracing::instrument(skip(state, body))]
pub async fn replace_events(
    State(state): State<AppState>,
    Json(body): Json<Vec<TimelineEvent>>,
) -> Result<StatusCode, AppError> {
    state.store.set_timeline_events(body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/timeline/{id}
#[utoipa::path(
    patch,
    path = "/api/timeline/{id}",
    params(("id" = String, Path, description = "Event UUID")),
    request_body = TimelineEventUpdate,
    responses(
        (status = 200, description = "Event updated", body = TimelineEvent),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "timeline"
)]
#[tracing::instrument(skip(state, body))]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TimelineEventUpdate>,
) -> Result<Json<TimelineEvent>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.update_timeline_event(id, body).await?))
}

/// DELETE /api/timeline/{id}
#[utoipa::path(
    delete,
    path = "/api/timeline/{id}",
    params(("id" = String, Path, description = "Event UUID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "timeline"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let uuid = parse_id(&id)?;
    if state.store.delete_timeline_event(uuid).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Timeline event {} not found", id)))
    }
}

/// POST /api/cases/{id}/timeline/import
#[utoipa::path(
    post,
    path = "/api/cases/{id}/timeline/import",
    params(("id" = String, Path, description = "Case UUID")),
    request_body = DocumentAnalysis,
    responses(
        (status = 201, description = "Dated analysis entries added to the timeline", body = Vec<TimelineEvent>),
        (status = 422, description = "Case does not exist", body = AppError)
    ),
    tag = "timeline"
)]
#[tracing::instrument(skip(state, body))]
pub async fn import_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<DocumentAnalysis>,
) -> Result<(StatusCode, Json<Vec<TimelineEvent>>), AppError> {
    let case_id = parse_id(&id)?;
    let created = documents::import_analysis_timeline(&state.store, case_id, &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
