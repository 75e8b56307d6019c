//! Billing domain errors

use thiserror::Error;

use core_kernel::{BillId, Classify, ErrorKind, PortError, RoomId, StayPeriod, UserId};

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Input rejected before reaching storage
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced room does not exist
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    /// The issuing account no longer exists
    #[error("Issuing user not found: {0}")]
    CreatorNotFound(UserId),

    /// Bill not found
    #[error("Bill not found: {0}")]
    BillNotFound(BillId),

    /// Text that is not a `VBYYYYMMDDnnn` bill number
    #[error("Invalid bill number: {0}")]
    InvalidBillNumber(String),

    /// A bill with this number already exists
    #[error("Bill number already issued: {0}")]
    DuplicateBillNumber(String),

    /// Another bill already occupies the room for part of the stay
    #[error("Room {room_number} is already booked for part of {period}")]
    RoomUnavailable {
        room_number: String,
        period: StayPeriod,
    },

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] PortError),
}

impl Classify for BillingError {
    fn kind(&self) -> ErrorKind {
        match self {
            BillingError::Validation(_) | BillingError::InvalidBillNumber(_) => ErrorKind::Validation,
            BillingError::RoomNotFound(_)
            | BillingError::CreatorNotFound(_)
            | BillingError::BillNotFound(_) => ErrorKind::NotFound,
            BillingError::DuplicateBillNumber(_) => ErrorKind::DuplicateKey,
            BillingError::RoomUnavailable { .. } => ErrorKind::Conflict,
            BillingError::Storage(e) => e.kind(),
        }
    }
}
