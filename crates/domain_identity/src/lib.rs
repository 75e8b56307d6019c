//! Identity Domain
//!
//! User accounts for the front desk: administrators manage rooms and staff,
//! cashiers issue bills. Passwords are stored only as Argon2 hashes and the
//! hash never leaves this crate and its storage adapters.
//!
//! There is no process-wide "current user". A successful [`IdentityService::login`]
//! yields an [`Identity`]; the API layer wraps it in a signed token and
//! rebuilds a [`Session`] from that token on every request.

pub mod error;
pub mod password;
pub mod ports;
pub mod service;
pub mod session;
pub mod user;

pub use error::IdentityError;
pub use password::{hash_password, verify_password};
pub use ports::UserPort;
pub use service::{IdentityConfig, IdentityService};
pub use session::{Identity, Session};
pub use user::{NewUser, NewUserRecord, Role, User, UserRecord};
