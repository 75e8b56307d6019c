//! Infrastructure Database Layer
//!
//! Storage for the hotel point-of-sale system: a SQLite file opened through
//! SQLx, plus an in-memory store with the same constraints for demos and
//! tests.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Repositories own the SQL and
//! map rows; adapters implement the domain ports (`RoomPort`, `BillPort`,
//! `UserPort`) on top of them and translate `DatabaseError` into
//! `PortError`. `Storage` bundles one implementation of every port.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, Storage, StorageBackend};
//!
//! let storage = Storage::open(StorageBackend::Sqlite, &DatabaseConfig::new("data/hotel_pos.db")).await?;
//! let rooms = storage.rooms.list_active().await?;
//! ```

pub mod pool;
pub mod error;
pub mod schema;
pub mod gateway;
pub mod repositories;
pub mod adapters;
pub mod memory;
pub mod storage;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use schema::ensure_schema;
pub use gateway::{Gateway, SqlValue, ExecResult};
pub use adapters::{SqliteBillAdapter, SqliteRoomAdapter, SqliteUserAdapter};
pub use memory::MemoryStore;
pub use storage::{Storage, StorageBackend};
