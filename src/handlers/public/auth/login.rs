// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::authenticate;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// POST /api/auth/login - Authenticate user and receive a bearer token
///
/// Expected Input:
/// ```json
/// { "username": "admin", "password": "admin123" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiI...",
///   "username": "admin",
///   "expiresAt": "2026-10-18T14:00:00Z"
/// }
/// ```
///
/// 400 when either field is missing or empty, 401 for any bad credential pair.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;

    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let issued = authenticate(state.store.as_ref(), &state.tokens, &username, &password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiResponse::success(LoginResponse {
        token: issued.token,
        username: issued.subject,
        expires_at: issued.expires_at,
    }))
}
