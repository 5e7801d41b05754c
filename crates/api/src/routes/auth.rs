//! Account route handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration response. The password hash never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Login response carrying the opaque session token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub email: String,
    pub name: String,
    pub token: String,
}

/// Create a new account.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let user = AuthService::new(state.pool())
        .register(
            body.email.as_deref(),
            body.password.as_deref(),
            body.name.as_deref(),
        )
        .await?;

    let response = RegisterResponse {
        email: user.email,
        name: user.name,
        created_at: user.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (user, token) = AuthService::new(state.pool())
        .login(body.email.as_deref(), body.password.as_deref())
        .await?;

    Ok(Json(LoginResponse {
        email: user.email,
        name: user.name,
        token: token.to_owned(),
    }))
}
