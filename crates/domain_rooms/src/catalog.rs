//! Room catalog service

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use core_kernel::{Clock, PortError, RoomId, StayPeriod};

use crate::error::RoomError;
use crate::ports::RoomPort;
use crate::room::{NewRoom, Room, RoomUpdate};

/// Room inventory operations
///
/// Room numbers are unique among active rooms only, so a number freed by
/// deactivation can be given to a new room.
#[derive(Clone)]
pub struct RoomCatalog {
    rooms: Arc<dyn RoomPort>,
    clock: Arc<dyn Clock>,
}

impl RoomCatalog {
    pub fn new(rooms: Arc<dyn RoomPort>, clock: Arc<dyn Clock>) -> Self {
        Self { rooms, clock }
    }

    /// Active rooms ordered by room number
    pub async fn list_active(&self) -> Result<Vec<Room>, RoomError> {
        Ok(self.rooms.list_active().await?)
    }

    /// A room by id, including deactivated ones
    pub async fn get(&self, id: RoomId) -> Result<Room, RoomError> {
        self.rooms.get_room(id).await.map_err(|e| not_found_as(e, id))
    }

    /// Adds a room to the inventory
    pub async fn create(&self, room: NewRoom) -> Result<Room, RoomError> {
        let room = room.normalized()?;

        if self.rooms.find_active_by_number(&room.room_number).await?.is_some() {
            return Err(RoomError::DuplicateRoomNumber(room.room_number));
        }

        let number = room.room_number.clone();
        let created = self
            .rooms
            .insert(room, self.clock.now())
            .await
            .map_err(|e| duplicate_as(e, &number))?;

        info!(room_id = %created.id, room_number = %created.room_number, "Room created");
        Ok(created)
    }

    /// Applies a partial update
    pub async fn update(&self, id: RoomId, update: RoomUpdate) -> Result<Room, RoomError> {
        let existing = self.get(id).await?;
        let update = update.normalized()?;

        if update.is_empty() {
            debug!(room_id = %id, "Empty room update");
            return Ok(existing);
        }

        // numbers are unique among active rooms only
        if let Some(number) = update.room_number.as_ref().filter(|_| existing.is_active) {
            if let Some(holder) = self.rooms.find_active_by_number(number).await? {
                if holder.id != id {
                    return Err(RoomError::DuplicateRoomNumber(number.clone()));
                }
            }
        }

        let number = update
            .room_number
            .clone()
            .unwrap_or_else(|| existing.room_number.clone());
        let updated = self
            .rooms
            .update(id, update, self.clock.now())
            .await
            .map_err(|e| match e {
                PortError::NotFound { .. } => RoomError::NotFound(id),
                other => duplicate_as(other, &number),
            })?;

        info!(room_id = %id, room_number = %updated.room_number, "Room updated");
        Ok(updated)
    }

    /// Marks a room inactive; repeating the call is a no-op
    pub async fn deactivate(&self, id: RoomId) -> Result<(), RoomError> {
        // Distinguishes "never existed" from "already inactive"
        self.get(id).await?;

        let changed = self
            .rooms
            .deactivate(id, self.clock.now())
            .await
            .map_err(|e| not_found_as(e, id))?;

        if changed {
            info!(room_id = %id, "Room deactivated");
        } else {
            debug!(room_id = %id, "Room already inactive");
        }
        Ok(())
    }

    /// True when no bill for the room overlaps `[check_in, check_out)`
    pub async fn check_availability(
        &self,
        id: RoomId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, RoomError> {
        let period = StayPeriod::new(check_in, check_out)
            .map_err(|e| RoomError::Validation(e.to_string()))?;

        self.get(id).await?;

        let taken = self.rooms.has_overlapping_bill(id, period).await?;
        debug!(room_id = %id, %period, available = !taken, "Availability checked");
        Ok(!taken)
    }
}

fn not_found_as(error: PortError, id: RoomId) -> RoomError {
    match error {
        PortError::NotFound { .. } => RoomError::NotFound(id),
        other => RoomError::Storage(other),
    }
}

fn duplicate_as(error: PortError, room_number: &str) -> RoomError {
    match error {
        PortError::Duplicate { .. } => RoomError::DuplicateRoomNumber(room_number.to_string()),
        other => RoomError::Storage(other),
    }
}
