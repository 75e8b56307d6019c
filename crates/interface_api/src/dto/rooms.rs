//! Room DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::RoomId;
use domain_rooms::{NewRoom, RoomType, RoomUpdate};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 20, message = "Room number must be 1-20 characters"))]
    pub room_number: String,

    pub room_type: RoomType,

    pub price_per_night: Decimal,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(request: CreateRoomRequest) -> Self {
        let room = NewRoom::new(request.room_number, request.room_type, request.price_per_night);
        match request.description {
            Some(description) => room.with_description(description),
            None => room,
        }
    }
}

/// Partial update; an empty description clears it
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 20, message = "Room number must be 1-20 characters"))]
    pub room_number: Option<String>,

    pub room_type: Option<RoomType>,

    pub price_per_night: Option<Decimal>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl From<UpdateRoomRequest> for RoomUpdate {
    fn from(request: UpdateRoomRequest) -> Self {
        RoomUpdate {
            room_number: request.room_number,
            room_type: request.room_type,
            price_per_night: request.price_per_night,
            description: request.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub available: bool,
}
