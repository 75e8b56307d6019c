//! Billing Domain - Room Stay Bills
//!
//! A bill charges one guest for one room over a range of calendar days:
//!
//! - `days = max(1, check_out - check_in)`
//! - `total = days x price_per_day`
//!
//! The nightly rate is copied into the bill when it is created, so editing a
//! room's price never changes bills already issued.
//!
//! # Bill numbers
//!
//! Numbers read `VB` + `YYYYMMDD` + a three-digit daily sequence, for example
//! `VB20240115001`. Storage adapters allocate the sequence and insert the
//! bill in one atomic unit, so concurrent bill creation cannot produce the
//! same number twice.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_billing::compute_stay;
//! use rust_decimal_macros::dec;
//!
//! let check_in = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let check_out = NaiveDate::from_ymd_opt(2024, 1, 18).unwrap();
//!
//! let charge = compute_stay(check_in, check_out, dec!(8500));
//! assert_eq!(charge.days, 3);
//! assert_eq!(charge.total, dec!(25500));
//! ```

pub mod bill;
pub mod engine;
pub mod error;
pub mod number;
pub mod ports;
pub mod receipt;
pub mod report;
pub mod stay;

pub use bill::{Bill, BillDetails, CreateBillRequest, NewBill, NumberAssignment};
pub use engine::{BillingConfig, BillingEngine};
pub use error::BillingError;
pub use number::{BillNumber, BILL_NUMBER_PREFIX};
pub use ports::BillPort;
pub use receipt::{BillRenderer, DEFAULT_RECEIPT_WIDTH};
pub use report::RevenueSummary;
pub use stay::{compute_stay, StayCharge};
