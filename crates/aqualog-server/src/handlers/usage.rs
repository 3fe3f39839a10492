//! Usage log handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::read_json;
use crate::{get_actor, AppError, AppState, MAX_PAGE_LIMIT};
use aqualog_core::models::{NewUsageEntry, UsageEntry, UsageFilter, UsageUpdate};

/// Query parameters for listing usage
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageQuery {
    pub user_id: Option<String>,
    /// Inclusive start date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct UsageListResponse {
    pub entries: Vec<UsageEntry>,
}

#[derive(Serialize)]
pub struct UsageEntryResponse {
    pub entry: UsageEntry,
}

/// GET /api/usage - List usage entries
pub async fn list_usage(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsageQuery>,
    request: Request,
) -> Result<Json<UsageListResponse>, AppError> {
    let actor = get_actor(request.headers());

    // Input validation: clamp the page size
    let limit = params.limit.map(|l| l.clamp(1, MAX_PAGE_LIMIT));

    let filter = UsageFilter::new()
        .user_id(params.user_id.filter(|s| !s.is_empty()))
        .start_date(params.start_date.filter(|s| !s.is_empty()))
        .end_date(params.end_date.filter(|s| !s.is_empty()))
        .limit(limit);

    let entries = state.db.list_usage(&filter)?;

    state.db.log_audit(
        &actor,
        "list",
        Some("usage"),
        filter.user_id.as_deref(),
        Some(&format!("count={}", entries.len())),
    )?;

    Ok(Json(UsageListResponse { entries }))
}

/// GET /api/usage/:id - Get a single usage entry
pub async fn get_usage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<UsageEntryResponse>, AppError> {
    let actor = get_actor(request.headers());

    let entry = state
        .db
        .get_usage(&id)?
        .ok_or_else(|| AppError::not_found("Usage entry not found."))?;

    state
        .db
        .log_audit(&actor, "get", Some("usage"), Some(&id), None)?;

    Ok(Json(UsageEntryResponse { entry }))
}

/// POST /api/usage - Log a usage event
pub async fn create_usage(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<UsageEntryResponse>), AppError> {
    let actor = get_actor(request.headers());
    let req: NewUsageEntry = read_json(request).await?;

    let entry = state.db.insert_usage(&req)?;

    state.db.log_audit(
        &actor,
        "create",
        Some("usage"),
        Some(&entry.id),
        Some(&format!("user={}, category={}", entry.user_id, entry.category)),
    )?;

    Ok((StatusCode::CREATED, Json(UsageEntryResponse { entry })))
}

/// PUT /api/usage/:id - Update a usage entry
pub async fn update_usage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<UsageEntryResponse>, AppError> {
    let actor = get_actor(request.headers());
    let req: UsageUpdate = read_json(request).await?;

    let entry = state.db.update_usage(&id, &req)?;

    state
        .db
        .log_audit(&actor, "update", Some("usage"), Some(&id), None)?;

    Ok(Json(UsageEntryResponse { entry }))
}

/// DELETE /api/usage/:id - Delete a usage entry
pub async fn delete_usage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<StatusCode, AppError> {
    let actor = get_actor(request.headers());

    state.db.delete_usage(&id)?;

    state
        .db
        .log_audit(&actor, "delete", Some("usage"), Some(&id), None)?;

    Ok(StatusCode::NO_CONTENT)
}
