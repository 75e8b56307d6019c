//! User management handlers (admin only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::UserId;
use domain_identity::{Session, User};

use crate::dto::users::CreateUserRequest;
use crate::{error::ApiError, AppState};

pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<User>>, ApiError> {
    session.require_admin()?;
    Ok(Json(state.identity.list_users().await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    session.require_admin()?;
    request.validate()?;

    let user = state.identity.create_user(request.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn remove_cashier(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    session.require_admin()?;

    state.identity.remove_cashier(UserId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
