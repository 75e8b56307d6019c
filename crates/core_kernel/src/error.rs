//! Error classification shared across the system
//!
//! Every domain error maps onto one [`ErrorKind`], which is what the calling
//! shell branches on. The HTTP layer turns kinds into status codes.

use serde::Serialize;
use std::fmt;

/// The error taxonomy exposed to callers of the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced room, user or bill does not exist
    NotFound,
    /// A unique constraint was violated (room number, username, bill number)
    DuplicateKey,
    /// Login failed because the password did not match
    InvalidCredentials,
    /// Input was rejected before reaching persistence
    Validation,
    /// The operation conflicts with existing data (double booking, referenced user)
    Conflict,
    /// The session lacks the required role
    Forbidden,
    /// Underlying I/O or an unclassified storage failure
    Storage,
}

impl ErrorKind {
    /// Returns the stable snake_case code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::DuplicateKey => "duplicate_key",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::Validation => "validation_error",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Storage => "storage_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Implemented by every domain error so callers can branch on the kind
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}
