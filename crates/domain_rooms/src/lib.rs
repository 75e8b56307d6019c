//! Room Catalog Domain
//!
//! The hotel's sellable inventory: rooms with a number, an AC/non-AC type
//! and a nightly rate. Rooms are never deleted. Deactivation hides a room
//! from the catalog and frees its number, while bills already issued for it
//! keep pointing at the row.
//!
//! # Examples
//!
//! ```rust
//! use domain_rooms::{NewRoom, RoomType};
//! use rust_decimal_macros::dec;
//!
//! let room = NewRoom::new(" 101 ", RoomType::Ac, dec!(8500))
//!     .with_description("Sea view")
//!     .normalized()
//!     .unwrap();
//! assert_eq!(room.room_number, "101");
//! ```

pub mod catalog;
pub mod error;
pub mod ports;
pub mod room;

pub use catalog::RoomCatalog;
pub use error::RoomError;
pub use ports::RoomPort;
pub use room::{NewRoom, Room, RoomType, RoomUpdate};
