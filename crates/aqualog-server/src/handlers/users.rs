//! User management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::{read_json, UserResponse};
use crate::{get_actor, AppError, AppState};
use aqualog_core::models::{User, UserUpdate};

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// GET /api/users - List all users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<UsersResponse>, AppError> {
    let actor = get_actor(request.headers());

    let users = state.db.list_users()?;

    // Audit log - read access
    state.db.log_audit(
        &actor,
        "list",
        Some("user"),
        None,
        Some(&format!("count={}", users.len())),
    )?;

    Ok(Json(UsersResponse { users }))
}

/// GET /api/users/:id - Get a single user
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<UserResponse>, AppError> {
    let actor = get_actor(request.headers());

    let user = state
        .db
        .get_user(&id)?
        .ok_or_else(|| AppError::not_found("User not found."))?;

    state
        .db
        .log_audit(&actor, "get", Some("user"), Some(&id), None)?;

    Ok(Json(UserResponse { user }))
}

/// PUT /api/users/:id - Update profile, goal or password
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<UserResponse>, AppError> {
    let actor = get_actor(request.headers());
    let req: UserUpdate = read_json(request).await?;

    let user = state.db.update_user(&id, &req)?;

    state.db.log_audit(
        &actor,
        "update",
        Some("user"),
        Some(&id),
        req.daily_goal
            .map(|goal| format!("daily_goal={}", goal))
            .as_deref(),
    )?;

    Ok(Json(UserResponse { user }))
}

/// DELETE /api/users/:id - Delete a user and their usage log
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<StatusCode, AppError> {
    let actor = get_actor(request.headers());

    state.db.delete_user(&id)?;

    state
        .db
        .log_audit(&actor, "delete", Some("user"), Some(&id), None)?;

    Ok(StatusCode::NO_CONTENT)
}
