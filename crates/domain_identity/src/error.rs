//! Identity domain errors

use thiserror::Error;

use core_kernel::{Classify, ErrorKind, PortError, UserId};

/// Errors that can occur in the identity domain
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No account with this username
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No account with this id
    #[error("User not found: {0}")]
    UserIdNotFound(UserId),

    /// Username exists but the password did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username already taken
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// Input rejected before reaching storage
    #[error("Validation error: {0}")]
    Validation(String),

    /// The session's role does not allow the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The account is still referenced by other records
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Hashing failure or a corrupt stored hash
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] PortError),
}

impl Classify for IdentityError {
    fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::UserNotFound(_) | IdentityError::UserIdNotFound(_) => ErrorKind::NotFound,
            IdentityError::InvalidCredentials => ErrorKind::InvalidCredentials,
            IdentityError::DuplicateUsername(_) => ErrorKind::DuplicateKey,
            IdentityError::Validation(_) => ErrorKind::Validation,
            IdentityError::Forbidden(_) => ErrorKind::Forbidden,
            IdentityError::Conflict(_) => ErrorKind::Conflict,
            IdentityError::Hashing(_) => ErrorKind::Storage,
            IdentityError::Storage(e) => e.kind(),
        }
    }
}
