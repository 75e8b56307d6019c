//! Billing Ports
//!
//! `BillPort` covers bill storage and daily number allocation. Bills are
//! append-only, so there is no update or delete.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{BillId, DomainPort, PortError};

use crate::bill::{Bill, BillDetails, NewBill};

#[async_trait]
pub trait BillPort: DomainPort {
    /// Reserves the next sequence for `day`
    ///
    /// The first reservation of a day continues after the highest sequence
    /// already present among that day's bills. A reserved sequence is never
    /// handed out again.
    async fn reserve_number(&self, day: NaiveDate) -> Result<u32, PortError>;

    /// Assigns the number and stores the bill as one atomic unit
    ///
    /// Errors:
    /// - `PortError::Duplicate` if the bill number is taken
    /// - `PortError::NotFound` if the room or the creator does not exist
    /// - `PortError::Overlap` if `exclusive_stay` is set and overlaps
    ///   another bill for the room
    async fn insert_bill(&self, bill: NewBill) -> Result<Bill, PortError>;

    /// All bills joined with room and creator, newest first
    async fn list_bills(&self) -> Result<Vec<BillDetails>, PortError>;

    /// One bill joined with room and creator
    async fn get_bill(&self, id: BillId) -> Result<Option<BillDetails>, PortError>;

    /// Bills whose number carries an issue date within `[from, to]`
    async fn bills_issued_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Bill>, PortError>;
}
