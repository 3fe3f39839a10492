//! Usage insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{get_actor, AppError, AppState};
use aqualog_core::insights::{summarize_usage, SummaryResult, UsageAlert};
use aqualog_core::models::User;

/// Query parameters for insight endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightQuery {
    pub user_id: Option<String>,
}

/// Summary response: the user alongside the flattened summary fields
#[derive(Serialize)]
pub struct SummaryResponse {
    pub user: User,
    #[serde(flatten)]
    pub summary: SummaryResult,
}

#[derive(Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<UsageAlert>,
}

/// Load the user and compute their summary as of now
fn summarize_for(state: &AppState, params: &InsightQuery) -> Result<(User, SummaryResult), AppError> {
    let user_id = params
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request("userId is required."))?;

    let user = state
        .db
        .get_user(user_id)?
        .ok_or_else(|| AppError::not_found("User not found."))?;

    let profile = state
        .db
        .get_goal_profile(&user.id)?
        .ok_or_else(|| AppError::not_found("User not found."))?;
    let entries = state.db.list_usage_for_user(&user.id)?;
    let summary = summarize_usage(&entries, &profile, chrono::Utc::now());

    Ok((user, summary))
}

/// GET /api/insights/summary - Windowed totals, trends, alerts and recommendations
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightQuery>,
    request: Request,
) -> Result<Json<SummaryResponse>, AppError> {
    let actor = get_actor(request.headers());

    let (user, summary) = summarize_for(&state, &params)?;

    state.db.log_audit(
        &actor,
        "view",
        Some("insights"),
        Some(&user.id),
        Some("summary"),
    )?;

    Ok(Json(SummaryResponse { user, summary }))
}

/// GET /api/insights/alerts - Current alerts only
pub async fn get_alerts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightQuery>,
    request: Request,
) -> Result<Json<AlertsResponse>, AppError> {
    let actor = get_actor(request.headers());

    let (user, summary) = summarize_for(&state, &params)?;

    state.db.log_audit(
        &actor,
        "view",
        Some("insights"),
        Some(&user.id),
        Some(&format!("alerts={}", summary.alerts.len())),
    )?;

    Ok(Json(AlertsResponse {
        alerts: summary.alerts,
    }))
}
