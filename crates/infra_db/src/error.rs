//! Database error types
//!
//! SQLite failures are classified once, here, so adapters can tell a
//! constraint violation apart from an I/O problem.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to open the database file or establish a connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check or not-null constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A write was refused because it conflicts with stored data
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Schema creation failed
    #[error("Schema setup failed: {0}")]
    SchemaFailed(String),

    /// A stored value could not be converted to its domain type
    #[error("Corrupt stored value: {0}")]
    Decode(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Filesystem error while preparing the storage location
    #[error("Storage location error: {0}")]
    Io(#[from] std::io::Error),

    /// Unclassified SQL error
    #[error("SQL error: {0}")]
    SqlError(#[source] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Room", 12);
    /// assert!(error.to_string().contains("Room"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Maps SQLx errors onto the variants above using the driver's
/// constraint classification
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &error {
            let message = db_err.message().to_string();
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => return DatabaseError::DuplicateEntry(message),
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return DatabaseError::ForeignKeyViolation(message)
                }
                sqlx::error::ErrorKind::NotNullViolation | sqlx::error::ErrorKind::CheckViolation => {
                    return DatabaseError::ConstraintViolation(message)
                }
                _ => {}
            }
        }

        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::Decode(error.to_string())
            }
            other => DatabaseError::SqlError(other),
        }
    }
}

/// Translation at the port boundary
impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => PortError::NotFound {
                entity_type: "record".to_string(),
                id: message,
            },
            DatabaseError::DuplicateEntry(message) => PortError::duplicate(message),
            DatabaseError::ForeignKeyViolation(message) | DatabaseError::Conflict(message) => {
                PortError::conflict(message)
            }
            DatabaseError::ConstraintViolation(message) => PortError::validation(message),
            other => PortError::Storage {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Classify, ErrorKind};

    #[test]
    fn test_port_translation() {
        assert_eq!(
            PortError::from(DatabaseError::DuplicateEntry("rooms.room_number".into())).kind(),
            ErrorKind::DuplicateKey
        );
        assert_eq!(
            PortError::from(DatabaseError::ForeignKeyViolation("bills.created_by".into())).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            PortError::from(DatabaseError::ConstraintViolation("total_days".into())).kind(),
            ErrorKind::Validation
        );
        assert_eq!(PortError::from(DatabaseError::PoolExhausted).kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_row_not_found() {
        assert!(DatabaseError::from(sqlx::Error::RowNotFound).is_not_found());
    }
}
