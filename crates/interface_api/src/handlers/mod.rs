//! Request handlers, one module per resource

pub mod auth;
pub mod bills;
pub mod health;
pub mod reports;
pub mod rooms;
pub mod users;
