//! Room Catalog Ports
//!
//! The `RoomPort` trait is everything the catalog needs from storage. The
//! SQLite adapter in `infra_db` and the in-memory store both implement it;
//! which one runs is chosen from configuration at startup.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_rooms::{RoomCatalog, RoomPort};
//! use std::sync::Arc;
//!
//! let rooms: Arc<dyn RoomPort> = storage.rooms.clone();
//! let catalog = RoomCatalog::new(rooms, clock);
//! let active = catalog.list_active().await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, PortError, RoomId, StayPeriod};

use crate::room::{NewRoom, Room, RoomUpdate};

/// Storage operations for rooms
///
/// Adapters report a clash on the active room-number index as
/// `PortError::Duplicate`.
#[async_trait]
pub trait RoomPort: DomainPort {
    // ========================================================================
    // Queries
    // ========================================================================

    /// Active rooms ordered by room number
    async fn list_active(&self) -> Result<Vec<Room>, PortError>;

    /// A room by id, active or not; `PortError::NotFound` if it never existed
    async fn get_room(&self, id: RoomId) -> Result<Room, PortError>;

    /// The active room holding `room_number`, if any
    async fn find_active_by_number(&self, room_number: &str) -> Result<Option<Room>, PortError>;

    /// Whether any bill for the room occupies a night inside `period`
    async fn has_overlapping_bill(&self, id: RoomId, period: StayPeriod) -> Result<bool, PortError>;

    // ========================================================================
    // Commands
    // ========================================================================

    /// Stores a new active room
    async fn insert(&self, room: NewRoom, now: DateTime<Utc>) -> Result<Room, PortError>;

    /// Applies a partial update and returns the stored row
    async fn update(&self, id: RoomId, update: RoomUpdate, now: DateTime<Utc>) -> Result<Room, PortError>;

    /// Clears the active flag
    ///
    /// Returns `false` when the room was already inactive. Bills keep
    /// referencing the row.
    async fn deactivate(&self, id: RoomId, now: DateTime<Utc>) -> Result<bool, PortError>;
}
