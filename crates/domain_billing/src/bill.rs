//! Bill records
//!
//! A bill is written once and never changed. It carries its own copy of the
//! nightly rate, so later edits to the room's price leave issued bills alone.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BillId, RoomId, StayPeriod, UserId};
use domain_rooms::RoomType;

use crate::number::BillNumber;

/// A stored bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub bill_number: BillNumber,
    pub room_id: RoomId,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_days: u32,
    /// Rate copied from the room when the bill was created
    pub price_per_day: Decimal,
    pub total_amount: Decimal,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Nights the bill occupies the room
    pub fn stay(&self) -> StayPeriod {
        StayPeriod::billed(self.check_in_date, self.check_out_date)
    }
}

/// A bill joined with its room and issuing user, as listed and printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDetails {
    #[serde(flatten)]
    pub bill: Bill,
    pub room_number: String,
    pub room_type: RoomType,
    pub created_by_username: String,
}

/// Input for creating a bill
///
/// `price_per_day` and `bill_number` are normally left empty: the room's
/// current rate is snapshotted and a number is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBillRequest {
    pub room_id: RoomId,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub price_per_day: Option<Decimal>,
    #[serde(default)]
    pub bill_number: Option<String>,
}

impl CreateBillRequest {
    pub fn new(
        room_id: RoomId,
        customer_name: impl Into<String>,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
    ) -> Self {
        Self {
            room_id,
            customer_name: customer_name.into(),
            customer_phone: None,
            customer_address: None,
            check_in_date,
            check_out_date,
            price_per_day: None,
            bill_number: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.customer_address = Some(address.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price_per_day = Some(price);
        self
    }

    pub fn with_bill_number(mut self, number: impl Into<String>) -> Self {
        self.bill_number = Some(number.into());
        self
    }
}

/// How the stored bill gets its number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberAssignment {
    /// Take the next sequence for this business date
    Allocate { day: NaiveDate },
    /// Use the caller's number and move the day's sequence past it
    Supplied(BillNumber),
}

/// A fully computed bill ready for storage
///
/// Adapters assign the number and insert in one unit, so two concurrent
/// inserts never share a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBill {
    pub number: NumberAssignment,
    pub room_id: RoomId,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_days: u32,
    pub price_per_day: Decimal,
    pub total_amount: Decimal,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    /// When set, the insert fails with `PortError::Overlap` if another bill
    /// for the room overlaps this range
    pub exclusive_stay: Option<StayPeriod>,
}

impl NewBill {
    /// Builds the stored record once the adapter has settled id and number
    pub fn into_bill(self, id: BillId, bill_number: BillNumber) -> Bill {
        Bill {
            id,
            bill_number,
            room_id: self.room_id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            total_days: self.total_days,
            price_per_day: self.price_per_day,
            total_amount: self.total_amount,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_details_serialize_flat() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let details = BillDetails {
            bill: Bill {
                id: BillId::new(1),
                bill_number: BillNumber::new(day, 1).unwrap(),
                room_id: RoomId::new(3),
                customer_name: "Nimal Perera".to_string(),
                customer_phone: None,
                customer_address: None,
                check_in_date: day,
                check_out_date: day + chrono::Duration::days(3),
                total_days: 3,
                price_per_day: dec!(8500),
                total_amount: dec!(25500),
                created_by: UserId::new(1),
                created_at: Utc::now(),
            },
            room_number: "101".to_string(),
            room_type: RoomType::Ac,
            created_by_username: "admin".to_string(),
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["bill_number"], "VB20240115001");
        assert_eq!(json["room_number"], "101");
        assert_eq!(json["room_type"], "ac");
        assert_eq!(json["total_days"], 3);
    }

    #[test]
    fn test_same_day_bill_occupies_one_night() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let stay = StayPeriod::billed(day, day);
        assert_eq!(stay.nights(), 1);
    }
}
