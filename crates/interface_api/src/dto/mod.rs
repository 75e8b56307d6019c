//! Request and response bodies
//!
//! Request DTOs derive `Validate`; handlers validate them before calling the
//! services, which re-check the business rules.

pub mod auth;
pub mod bills;
pub mod rooms;
pub mod users;
