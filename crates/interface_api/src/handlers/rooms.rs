//! Room handlers
//!
//! Reads are open to any signed-in user; changes require an admin.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::RoomId;
use domain_identity::Session;
use domain_rooms::Room;

use crate::dto::rooms::{AvailabilityQuery, AvailabilityResponse, CreateRoomRequest, UpdateRoomRequest};
use crate::{error::ApiError, AppState};

/// Lists active rooms ordered by number
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, ApiError> {
    Ok(Json(state.rooms.list_active().await?))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Room>, ApiError> {
    Ok(Json(state.rooms.get(RoomId::new(id)).await?))
}

pub async fn create_room(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    session.require_admin()?;
    request.validate()?;

    let room = state.rooms.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn update_room(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    session.require_admin()?;
    request.validate()?;

    Ok(Json(state.rooms.update(RoomId::new(id), request.into()).await?))
}

/// Soft delete; bills keep referring to the room
pub async fn deactivate_room(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    session.require_admin()?;

    state.rooms.deactivate(RoomId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let room_id = RoomId::new(id);
    let available = state
        .rooms
        .check_availability(room_id, query.check_in, query.check_out)
        .await?;

    Ok(Json(AvailabilityResponse {
        room_id,
        check_in: query.check_in,
        check_out: query.check_out,
        available,
    }))
}
