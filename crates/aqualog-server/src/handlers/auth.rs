//! Authentication-related handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::read_json;
use crate::{get_actor, AppError, AppState};
use aqualog_core::models::{NewUser, User};

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// Identifier of the caller
    pub user: String,
    /// How the caller was authenticated
    pub auth_method: String,
}

/// Response wrapping a single user
#[derive(Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Request body for logging in
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// GET /health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/me - Get the currently authenticated caller
pub async fn get_me(State(state): State<Arc<AppState>>, request: Request) -> Json<MeResponse> {
    let actor = get_actor(request.headers());

    let auth_method = if !state.config.require_auth {
        "none"
    } else if actor == "api-key" {
        "api_key"
    } else {
        "unknown"
    };

    Json(MeResponse {
        user: actor,
        auth_method: auth_method.to_string(),
    })
}

/// POST /api/auth/register - Create a user
pub async fn register(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let actor = get_actor(request.headers());
    let req: NewUser = read_json(request).await?;

    let user = state.db.create_user(&req)?;

    state.db.log_audit(
        &actor,
        "register",
        Some("user"),
        Some(&user.id),
        Some(&format!("email={}", user.email)),
    )?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// POST /api/auth/login - Check credentials
pub async fn login(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<UserResponse>, AppError> {
    let actor = get_actor(request.headers());
    let req: LoginRequest = read_json(request).await?;

    let user = match state.db.verify_credentials(&req.email, &req.password) {
        Ok(user) => user,
        Err(e) => {
            state
                .db
                .log_audit(&actor, "login_failed", Some("user"), None, None)?;
            return Err(e.into());
        }
    };

    state
        .db
        .log_audit(&actor, "login", Some("user"), Some(&user.id), None)?;

    Ok(Json(UserResponse { user }))
}
