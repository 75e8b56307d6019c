//! Core Kernel - Foundational types for the hotel point-of-sale system
//!
//! This crate provides the building blocks shared by every domain module:
//! - Money types with precise decimal arithmetic
//! - Calendar stay periods, business timezone and clocks
//! - Strongly-typed row identifiers
//! - The port error type and error classification used by all adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{StayPeriod, TemporalError, Timezone, Clock, SystemClock, FixedClock, nights_between};
pub use identifiers::{RoomId, BillId, UserId};
pub use error::{ErrorKind, Classify};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
