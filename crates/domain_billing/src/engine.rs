//! Billing engine
//!
//! Turns a stay request into a stored bill: validates the request,
//! snapshots the room's rate, computes the charge and hands the record to
//! the bill port, which assigns the number in the same unit as the insert.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use core_kernel::{BillId, Clock, Currency, PortError, StayPeriod, Timezone, UserId};
use domain_rooms::RoomPort;

use crate::bill::{Bill, BillDetails, CreateBillRequest, NewBill, NumberAssignment};
use crate::error::BillingError;
use crate::number::BillNumber;
use crate::ports::BillPort;
use crate::receipt::{BillRenderer, DEFAULT_RECEIPT_WIDTH};
use crate::report::RevenueSummary;
use crate::stay::{compute_stay, StayCharge};

/// Billing settings
#[derive(Debug, Clone)]
pub struct BillingConfig {
    pub currency: Currency,
    /// Timezone used for printed timestamps
    pub timezone: Timezone,
    pub hotel_name: String,
    pub receipt_width: usize,
    /// Reject bills whose stay overlaps an existing bill for the room
    pub enforce_availability: bool,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::LKR,
            timezone: Timezone::default(),
            hotel_name: "Hotel".to_string(),
            receipt_width: DEFAULT_RECEIPT_WIDTH,
            enforce_availability: true,
        }
    }
}

/// Bill creation, numbering, retrieval and printing
#[derive(Clone)]
pub struct BillingEngine {
    bills: Arc<dyn BillPort>,
    rooms: Arc<dyn RoomPort>,
    clock: Arc<dyn Clock>,
    config: BillingConfig,
    renderer: BillRenderer,
}

impl BillingEngine {
    pub fn new(
        bills: Arc<dyn BillPort>,
        rooms: Arc<dyn RoomPort>,
        clock: Arc<dyn Clock>,
        config: BillingConfig,
    ) -> Self {
        let renderer = BillRenderer::new(
            config.receipt_width,
            config.currency,
            config.timezone,
            config.hotel_name.clone(),
        );
        Self {
            bills,
            rooms,
            clock,
            config,
            renderer,
        }
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Reserves the next bill number for today's business date
    ///
    /// Each call returns a fresh number, whether or not a bill is later
    /// stored with it.
    pub async fn generate_bill_number(&self) -> Result<BillNumber, BillingError> {
        let day = self.clock.today();
        let sequence = self.bills.reserve_number(day).await?;
        let number = BillNumber::new(day, sequence)?;
        debug!(bill_number = %number, "Bill number reserved");
        Ok(number)
    }

    /// Days and charge for a stay at the given rate
    pub fn compute_stay(&self, check_in: NaiveDate, check_out: NaiveDate, price_per_day: Decimal) -> StayCharge {
        compute_stay(check_in, check_out, price_per_day)
    }

    /// Creates and stores a bill issued by `created_by`
    pub async fn create_bill(&self, created_by: UserId, request: CreateBillRequest) -> Result<Bill, BillingError> {
        let customer_name = request.customer_name.trim().to_string();
        if customer_name.is_empty() {
            return Err(BillingError::Validation("Customer name is required".to_string()));
        }
        if request.check_out_date < request.check_in_date {
            return Err(BillingError::Validation(format!(
                "Check-out {} is before check-in {}",
                request.check_out_date, request.check_in_date
            )));
        }
        if let Some(price) = request.price_per_day {
            if price <= Decimal::ZERO {
                return Err(BillingError::Validation(format!(
                    "Price per day must be greater than zero, got {}",
                    price
                )));
            }
        }

        let number = match request.bill_number.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => NumberAssignment::Supplied(text.parse()?),
            None => NumberAssignment::Allocate { day: self.clock.today() },
        };

        let room = self.rooms.get_room(request.room_id).await.map_err(|e| match e {
            PortError::NotFound { .. } => BillingError::RoomNotFound(request.room_id),
            other => BillingError::Storage(other),
        })?;
        if !room.is_active {
            return Err(BillingError::Validation(format!(
                "Room {} is not active",
                room.room_number
            )));
        }

        let price = request.price_per_day.unwrap_or(room.price_per_night);
        let charge = compute_stay(request.check_in_date, request.check_out_date, price);
        let stay = StayPeriod::billed(request.check_in_date, request.check_out_date);

        let new_bill = NewBill {
            number,
            room_id: room.id,
            customer_name,
            customer_phone: non_blank(request.customer_phone),
            customer_address: non_blank(request.customer_address),
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            total_days: charge.days,
            price_per_day: charge.price_per_day,
            total_amount: charge.total,
            created_by,
            created_at: self.clock.now(),
            exclusive_stay: self.config.enforce_availability.then_some(stay),
        };

        let bill = self.bills.insert_bill(new_bill).await.map_err(|e| match e {
            PortError::Duplicate { .. } => BillingError::DuplicateBillNumber(describe(number)),
            PortError::Overlap { .. } => {
                warn!(room_number = %room.room_number, %stay, "Rejected overlapping bill");
                BillingError::RoomUnavailable {
                    room_number: room.room_number.clone(),
                    period: stay,
                }
            }
            PortError::NotFound { ref entity_type, .. } if entity_type == "User" => {
                warn!(%created_by, "Bill issued by an unknown user");
                BillingError::CreatorNotFound(created_by)
            }
            PortError::NotFound { .. } => BillingError::RoomNotFound(room.id),
            other => BillingError::Storage(other),
        })?;

        info!(
            bill_id = %bill.id,
            bill_number = %bill.bill_number,
            room_number = %room.room_number,
            days = bill.total_days,
            total = %bill.total_amount,
            created_by = %created_by,
            "Bill created"
        );
        Ok(bill)
    }

    /// All bills, newest first
    pub async fn list_bills(&self) -> Result<Vec<BillDetails>, BillingError> {
        Ok(self.bills.list_bills().await?)
    }

    pub async fn get_bill(&self, id: BillId) -> Result<Option<BillDetails>, BillingError> {
        Ok(self.bills.get_bill(id).await?)
    }

    /// Fixed-width text rendering of a bill
    pub async fn print_bill(&self, id: BillId) -> Result<String, BillingError> {
        let details = self
            .get_bill(id)
            .await?
            .ok_or(BillingError::BillNotFound(id))?;
        Ok(self.renderer.render(&details))
    }

    /// Count, days and revenue of bills issued from `from` to `to` inclusive
    pub async fn revenue_summary(&self, from: NaiveDate, to: NaiveDate) -> Result<RevenueSummary, BillingError> {
        if to < from {
            return Err(BillingError::Validation(format!(
                "Report range ends ({}) before it starts ({})",
                to, from
            )));
        }

        let bills = self.bills.bills_issued_between(from, to).await?;
        Ok(RevenueSummary::from_bills(from, to, self.config.currency, &bills))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn describe(number: NumberAssignment) -> String {
    match number {
        NumberAssignment::Supplied(n) => n.to_string(),
        NumberAssignment::Allocate { day } => BillNumber::day_prefix(day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use core_kernel::{Classify, DomainPort, ErrorKind, FixedClock, RoomId};
    use domain_rooms::{NewRoom, Room, RoomUpdate};
    use rust_decimal_macros::dec;

    /// Port that fails every call, proving validation runs before storage
    struct Offline;

    impl DomainPort for Offline {}

    #[async_trait]
    impl BillPort for Offline {
        async fn reserve_number(&self, _day: NaiveDate) -> Result<u32, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn insert_bill(&self, _bill: NewBill) -> Result<Bill, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn list_bills(&self) -> Result<Vec<BillDetails>, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn get_bill(&self, _id: BillId) -> Result<Option<BillDetails>, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn bills_issued_between(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<Bill>, PortError> {
            Err(PortError::storage("offline"))
        }
    }

    #[async_trait]
    impl RoomPort for Offline {
        async fn list_active(&self) -> Result<Vec<Room>, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn get_room(&self, _id: RoomId) -> Result<Room, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn find_active_by_number(&self, _n: &str) -> Result<Option<Room>, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn has_overlapping_bill(&self, _id: RoomId, _p: StayPeriod) -> Result<bool, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn insert(&self, _r: NewRoom, _now: DateTime<Utc>) -> Result<Room, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn update(&self, _id: RoomId, _u: RoomUpdate, _now: DateTime<Utc>) -> Result<Room, PortError> {
            Err(PortError::storage("offline"))
        }
        async fn deactivate(&self, _id: RoomId, _now: DateTime<Utc>) -> Result<bool, PortError> {
            Err(PortError::storage("offline"))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> BillingEngine {
        let port = Arc::new(Offline);
        BillingEngine::new(
            port.clone(),
            port,
            Arc::new(FixedClock::on(date(2024, 1, 15))),
            BillingConfig::default(),
        )
    }

    async fn rejected(request: CreateBillRequest) -> BillingError {
        engine().create_bill(UserId::new(1), request).await.unwrap_err()
    }

    #[tokio::test]
    async fn test_blank_customer_name_rejected() {
        let err = rejected(CreateBillRequest::new(RoomId::new(1), "  ", date(2024, 1, 15), date(2024, 1, 16))).await;
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_checkout_before_checkin_rejected() {
        let err = rejected(CreateBillRequest::new(RoomId::new(1), "Guest", date(2024, 1, 18), date(2024, 1, 15))).await;
        assert!(matches!(err, BillingError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_positive_supplied_price_rejected() {
        let request = CreateBillRequest::new(RoomId::new(1), "Guest", date(2024, 1, 15), date(2024, 1, 16))
            .with_price(dec!(0));
        assert_eq!(rejected(request).await.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_malformed_supplied_number_rejected() {
        let request = CreateBillRequest::new(RoomId::new(1), "Guest", date(2024, 1, 15), date(2024, 1, 16))
            .with_bill_number("INV-0001");
        assert!(matches!(rejected(request).await, BillingError::InvalidBillNumber(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_masked() {
        let err = rejected(CreateBillRequest::new(RoomId::new(1), "Guest", date(2024, 1, 15), date(2024, 1, 16))).await;
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_report_range_must_be_ordered() {
        let err = engine().revenue_summary(date(2024, 1, 20), date(2024, 1, 1)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_compute_stay_delegates() {
        let charge = engine().compute_stay(date(2024, 1, 15), date(2024, 1, 18), dec!(8500));
        assert_eq!((charge.days, charge.total), (3, dec!(25500)));
    }
}
