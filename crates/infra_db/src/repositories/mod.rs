//! Repository implementations for the hotel tables
//!
//! Repositories own the SQL and map to plain row structs. They know nothing
//! about domain types; the adapters translate rows into domain records.

pub mod bill;
pub mod room;
pub mod user;

pub use bill::BillRepository;
pub use room::RoomRepository;
pub use user::UserRepository;
