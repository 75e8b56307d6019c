//! Room catalog errors

use thiserror::Error;

use core_kernel::{Classify, ErrorKind, PortError, RoomId};

/// Errors that can occur in the room catalog
#[derive(Debug, Error)]
pub enum RoomError {
    /// Input rejected before reaching storage
    #[error("Validation error: {0}")]
    Validation(String),

    /// Room not found
    #[error("Room not found: {0}")]
    NotFound(RoomId),

    /// Another active room already holds this number
    #[error("Room number '{0}' is already in use by an active room")]
    DuplicateRoomNumber(String),

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] PortError),
}

impl Classify for RoomError {
    fn kind(&self) -> ErrorKind {
        match self {
            RoomError::Validation(_) => ErrorKind::Validation,
            RoomError::NotFound(_) => ErrorKind::NotFound,
            RoomError::DuplicateRoomNumber(_) => ErrorKind::DuplicateKey,
            RoomError::Storage(e) => e.kind(),
        }
    }
}
