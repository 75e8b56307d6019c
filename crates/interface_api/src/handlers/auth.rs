//! Login and session handlers

use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;
use validator::Validate;

use domain_identity::{Session, User};

use crate::auth::create_token;
use crate::dto::auth::{ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::{error::ApiError, AppState};

/// Exchanges credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let identity = state.identity.login(&request.username, &request.password).await?;
    let ttl = state.config.auth.token_ttl_secs;
    let token = create_token(&identity, &state.config.auth.jwt_secret, ttl)?;

    info!(username = %identity.username, role = %identity.role, "Session issued");
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: ttl,
        user: identity,
    }))
}

/// The account behind the caller's token
pub async fn current_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.identity.current_user(&session).await?))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    state
        .identity
        .change_password(&session, &request.current_password, &request.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
