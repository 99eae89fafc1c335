use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use common::errors::AppError;
use common::models::{DiaryEntry, DiaryRequest};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::service::DiaryService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DiaryService>,
}

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "diary-service" }))
}

#[utoipa::path(
    post,
    path = "/api/diary",
    request_body = DiaryRequest,
    responses(
        (status = 201, description = "Diary entry created with the day's weather embedded", body = DiaryEntry),
        (status = 400, description = "Date outside the accepted window"),
        (status = 502, description = "Weather could not be resolved")
    ),
    tag = "diary"
)]
pub async fn create_diary(
    State(state): State<AppState>,
    Json(request): Json<DiaryRequest>,
) -> Result<(StatusCode, Json<DiaryEntry>), AppError> {
    info!(date = %request.date, "Create diary request received");

    let entry = state.service.create(request.date, request.text).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/api/diary",
    params(
        ("date" = NaiveDate, Query, description = "Calendar date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "All entries for the date, oldest first", body = Vec<DiaryEntry>)
    ),
    tag = "diary"
)]
pub async fn read_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<DiaryEntry>>, AppError> {
    let entries = state.service.read_by_date(query.date).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/diary/range",
    params(
        ("start" = NaiveDate, Query, description = "Range start, inclusive"),
        ("end" = NaiveDate, Query, description = "Range end, inclusive")
    ),
    responses(
        (status = 200, description = "All entries in the inclusive range", body = Vec<DiaryEntry>),
        (status = 400, description = "End date before start date")
    ),
    tag = "diary"
)]
pub async fn read_diaries(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<DiaryEntry>>, AppError> {
    let entries = state.service.read_by_range(query.start, query.end).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    put,
    path = "/api/diary",
    request_body = DiaryRequest,
    responses(
        (status = 204, description = "First entry for the date rewritten"),
        (status = 404, description = "No entry exists for the date")
    ),
    tag = "diary"
)]
pub async fn update_diary(
    State(state): State<AppState>,
    Json(request): Json<DiaryRequest>,
) -> Result<StatusCode, AppError> {
    info!(date = %request.date, "Update diary request received");

    state.service.update(request.date, request.text).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/diary",
    params(
        ("date" = NaiveDate, Query, description = "Calendar date, YYYY-MM-DD")
    ),
    responses(
        (status = 204, description = "Every entry for the date removed; succeeds even with zero matches")
    ),
    tag = "diary"
)]
pub async fn delete_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<StatusCode, AppError> {
    info!(date = %query.date, "Delete diary request received");

    state.service.delete(query.date).await?;

    Ok(StatusCode::NO_CONTENT)
}
