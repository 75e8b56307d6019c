//! Ports and Adapters Infrastructure
//!
//! Each domain defines a port trait (`RoomPort`, `BillPort`, `UserPort`)
//! extending the marker trait here. Two adapter families implement them:
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            │  Domain services (catalog,   │
//!            │  billing engine, identity)   │
//!            └──────────────┬───────────────┘
//!                           ▼
//!            ┌──────────────────────────────┐
//!            │          Port traits         │
//!            └──────┬────────────────┬──────┘
//!                   ▼                ▼
//!          ┌────────────────┐ ┌───────────────┐
//!          │ SQLite adapter │ │  In-memory    │
//!          │   (infra_db)   │ │  store        │
//!          └────────────────┘ └───────────────┘
//! ```
//!
//! All adapters report failures as [`PortError`], so services translate
//! storage problems into domain errors in exactly one place.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

use crate::error::{Classify, ErrorKind};

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A unique constraint rejected the write
    #[error("Duplicate: {message}")]
    Duplicate {
        message: String,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// A requested period overlaps one already held for the same resource
    #[error("Overlap: {message}")]
    Overlap {
        message: String,
    },

    /// The store rejected the values (check or not-null constraint)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// Underlying I/O or unclassified storage failure
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Duplicate error
    pub fn duplicate(message: impl Into<String>) -> Self {
        PortError::Duplicate {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates an Overlap error
    pub fn overlap(message: impl Into<String>) -> Self {
        PortError::Overlap {
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Storage error without a source
    pub fn storage(message: impl Into<String>) -> Self {
        PortError::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if a unique constraint rejected the write
    pub fn is_duplicate(&self) -> bool {
        matches!(self, PortError::Duplicate { .. })
    }

    pub fn is_overlap(&self) -> bool {
        matches!(self, PortError::Overlap { .. })
    }
}

impl Classify for PortError {
    fn kind(&self) -> ErrorKind {
        match self {
            PortError::NotFound { .. } => ErrorKind::NotFound,
            PortError::Duplicate { .. } => ErrorKind::DuplicateKey,
            PortError::Conflict { .. } | PortError::Overlap { .. } => ErrorKind::Conflict,
            PortError::Validation { .. } => ErrorKind::Validation,
            PortError::Storage { .. } => ErrorKind::Storage,
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across tasks
/// behind an `Arc<dyn ...>`.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Room", "ROOM-12");
        assert!(error.is_not_found());
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert!(error.to_string().contains("Room"));
        assert!(error.to_string().contains("ROOM-12"));
    }

    #[test]
    fn test_port_error_classification() {
        assert_eq!(PortError::duplicate("room_number").kind(), ErrorKind::DuplicateKey);
        assert_eq!(PortError::conflict("overlap").kind(), ErrorKind::Conflict);
        assert_eq!(PortError::storage("disk full").kind(), ErrorKind::Storage);
        assert!(PortError::duplicate("x").is_duplicate());
    }
}
