//! Domain Adapters
//!
//! SQLite implementations of the domain ports. Each adapter wraps a
//! repository, converts rows into domain records and database errors into
//! `PortError`.
//!
//! ```rust,ignore
//! use infra_db::{adapters::SqliteRoomAdapter, Gateway};
//! use domain_rooms::RoomPort;
//!
//! let rooms: Arc<dyn RoomPort> = Arc::new(SqliteRoomAdapter::new(Gateway::new(pool)));
//! let active = rooms.list_active().await?;
//! ```

pub mod bill;
pub mod room;
pub mod user;

pub use bill::SqliteBillAdapter;
pub use room::SqliteRoomAdapter;
pub use user::SqliteUserAdapter;

use std::str::FromStr;

use rust_decimal::Decimal;

use core_kernel::PortError;

use crate::error::DatabaseError;

/// Parses a decimal stored as text
pub(crate) fn parse_decimal(column: &str, text: &str) -> Result<Decimal, PortError> {
    Decimal::from_str(text)
        .map_err(|e| DatabaseError::Decode(format!("{} '{}': {}", column, text, e)).into())
}
