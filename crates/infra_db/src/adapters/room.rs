//! SQLite Room Adapter
//!
//! Implements `RoomPort` over the `RoomRepository`, converting rows to
//! domain rooms and database errors to port errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError, RoomId, StayPeriod};
use domain_rooms::{NewRoom, Room, RoomPort, RoomType, RoomUpdate};

use crate::adapters::parse_decimal;
use crate::error::DatabaseError;
use crate::gateway::Gateway;
use crate::repositories::room::{DbRoomType, NewRoomRow, RoomChanges, RoomRepository, RoomRow};

/// SQLite-backed implementation of the RoomPort trait
#[derive(Debug, Clone)]
pub struct SqliteRoomAdapter {
    repository: RoomRepository,
}

impl SqliteRoomAdapter {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            repository: RoomRepository::new(gateway),
        }
    }
}

impl DomainPort for SqliteRoomAdapter {}

#[async_trait]
impl RoomPort for SqliteRoomAdapter {
    #[instrument(skip(self))]
    async fn list_active(&self) -> Result<Vec<Room>, PortError> {
        debug!("Listing active rooms");
        let rows = self.repository.list_active().await?;
        rows.into_iter().map(row_to_room).collect()
    }

    #[instrument(skip(self), fields(room_id = %id))]
    async fn get_room(&self, id: RoomId) -> Result<Room, PortError> {
        let row = self.repository.get_by_id(id.value()).await.map_err(|e| not_found(e, id))?;
        row_to_room(row)
    }

    #[instrument(skip(self))]
    async fn find_active_by_number(&self, room_number: &str) -> Result<Option<Room>, PortError> {
        self.repository
            .find_active_by_number(room_number)
            .await?
            .map(row_to_room)
            .transpose()
    }

    #[instrument(skip(self), fields(room_id = %id, period = %period))]
    async fn has_overlapping_bill(&self, id: RoomId, period: StayPeriod) -> Result<bool, PortError> {
        Ok(self
            .repository
            .has_overlapping_bill(id.value(), period.check_in, period.check_out)
            .await?)
    }

    #[instrument(skip(self, room), fields(room_number = %room.room_number))]
    async fn insert(&self, room: NewRoom, now: DateTime<Utc>) -> Result<Room, PortError> {
        debug!("Inserting room");
        let id = self
            .repository
            .insert(NewRoomRow {
                room_number: room.room_number,
                room_type: to_db_room_type(room.room_type),
                price_per_night: room.price_per_night,
                description: room.description,
                now,
            })
            .await?;
        self.get_room(RoomId::new(id)).await
    }

    #[instrument(skip(self, update), fields(room_id = %id))]
    async fn update(&self, id: RoomId, update: RoomUpdate, now: DateTime<Utc>) -> Result<Room, PortError> {
        debug!("Updating room");
        self.repository
            .update(
                id.value(),
                RoomChanges {
                    room_number: update.room_number,
                    room_type: update.room_type.map(to_db_room_type),
                    price_per_night: update.price_per_night,
                    description: update.description,
                    now,
                },
            )
            .await
            .map_err(|e| not_found(e, id))?;
        self.get_room(id).await
    }

    #[instrument(skip(self), fields(room_id = %id))]
    async fn deactivate(&self, id: RoomId, now: DateTime<Utc>) -> Result<bool, PortError> {
        self.repository
            .deactivate(id.value(), now)
            .await
            .map_err(|e| not_found(e, id))
    }
}

fn not_found(error: DatabaseError, id: RoomId) -> PortError {
    if error.is_not_found() {
        PortError::not_found("Room", id)
    } else {
        error.into()
    }
}

pub(crate) fn to_db_room_type(room_type: RoomType) -> DbRoomType {
    match room_type {
        RoomType::Ac => DbRoomType::Ac,
        RoomType::NonAc => DbRoomType::NonAc,
    }
}

pub(crate) fn from_db_room_type(room_type: DbRoomType) -> RoomType {
    match room_type {
        DbRoomType::Ac => RoomType::Ac,
        DbRoomType::NonAc => RoomType::NonAc,
    }
}

fn row_to_room(row: RoomRow) -> Result<Room, PortError> {
    Ok(Room {
        id: RoomId::new(row.id),
        price_per_night: parse_decimal("rooms.price_per_night", &row.price_per_night)?,
        room_number: row.room_number,
        room_type: from_db_room_type(row.room_type),
        description: row.description,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
