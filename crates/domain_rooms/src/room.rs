//! Room records and their validation rules

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::RoomId;

use crate::error::RoomError;

/// Air-conditioned or not; the only room classification the hotel uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Ac,
    NonAc,
}

impl RoomType {
    /// Storage and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Ac => "ac",
            RoomType::NonAc => "non_ac",
        }
    }

    /// Label printed on bills
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Ac => "AC",
            RoomType::NonAc => "Non-AC",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = RoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ac" => Ok(RoomType::Ac),
            "non_ac" => Ok(RoomType::NonAc),
            other => Err(RoomError::Validation(format!("Unknown room type '{}'", other))),
        }
    }
}

/// A priced unit of inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_number: String,
    pub room_type: RoomType,
    pub price_per_night: Decimal,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a room that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    pub room_number: String,
    pub room_type: RoomType,
    pub price_per_night: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewRoom {
    pub fn new(room_number: impl Into<String>, room_type: RoomType, price_per_night: Decimal) -> Self {
        Self {
            room_number: room_number.into(),
            room_type,
            price_per_night,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Trims text fields and checks the room number and price
    pub fn normalized(self) -> Result<Self, RoomError> {
        Ok(Self {
            room_number: normalize_room_number(&self.room_number)?,
            room_type: self.room_type,
            price_per_night: validate_price(self.price_per_night)?,
            description: normalize_description(self.description),
        })
    }
}

/// A partial update; `None` leaves the field untouched
///
/// An empty description clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub room_type: Option<RoomType>,
    #[serde(default)]
    pub price_per_night: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RoomUpdate {
    pub fn price(price: Decimal) -> Self {
        Self {
            price_per_night: Some(price),
            ..Default::default()
        }
    }

    pub fn number(room_number: impl Into<String>) -> Self {
        Self {
            room_number: Some(room_number.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.room_number.is_none()
            && self.room_type.is_none()
            && self.price_per_night.is_none()
            && self.description.is_none()
    }

    /// Validates the supplied fields, leaving absent ones as they are
    pub fn normalized(self) -> Result<Self, RoomError> {
        Ok(Self {
            room_number: self.room_number.as_deref().map(normalize_room_number).transpose()?,
            room_type: self.room_type,
            price_per_night: self.price_per_night.map(validate_price).transpose()?,
            description: self.description.map(|d| d.trim().to_string()),
        })
    }

    /// Applies the update to a stored room
    pub fn apply_to(&self, room: &mut Room, now: DateTime<Utc>) {
        if let Some(number) = &self.room_number {
            room.room_number = number.clone();
        }
        if let Some(room_type) = self.room_type {
            room.room_type = room_type;
        }
        if let Some(price) = self.price_per_night {
            room.price_per_night = price;
        }
        if let Some(description) = &self.description {
            room.description = normalize_description(Some(description.clone()));
        }
        room.updated_at = now;
    }
}

fn normalize_room_number(number: &str) -> Result<String, RoomError> {
    let trimmed = number.trim();
    if trimmed.is_empty() {
        return Err(RoomError::Validation("Room number is required".to_string()));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: Decimal) -> Result<Decimal, RoomError> {
    if price <= Decimal::ZERO {
        return Err(RoomError::Validation(format!(
            "Price per night must be greater than zero, got {}",
            price
        )));
    }
    Ok(price)
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
