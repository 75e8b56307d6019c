//! SQLite Bill Adapter
//!
//! Bill numbers are allocated and bills inserted in one transaction whose
//! first statement is the `bill_sequences` upsert, so the transaction holds
//! the write lock from the start. Writers inside this process additionally
//! queue on a mutex instead of spinning on SQLite's busy handler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use core_kernel::{BillId, DomainPort, PortError, RoomId, UserId};
use domain_billing::{Bill, BillDetails, BillNumber, BillPort, NewBill, NumberAssignment};

use crate::adapters::parse_decimal;
use crate::adapters::room::from_db_room_type;
use crate::error::DatabaseError;
use crate::gateway::Gateway;
use crate::repositories::bill::{BillDetailsRow, BillRepository, BillRow, NewBillRow};

/// SQLite-backed implementation of the BillPort trait
#[derive(Debug, Clone)]
pub struct SqliteBillAdapter {
    repository: BillRepository,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteBillAdapter {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            repository: BillRepository::new(gateway),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

impl DomainPort for SqliteBillAdapter {}

#[async_trait]
impl BillPort for SqliteBillAdapter {
    #[instrument(skip(self))]
    async fn reserve_number(&self, day: NaiveDate) -> Result<u32, PortError> {
        let _guard = self.write_lock.lock().await;
        let sequence = BillRepository::next_sequence(
            self.repository.gateway().pool(),
            &day_key(day),
            &BillNumber::day_prefix(day),
        )
        .await?;
        debug!(sequence, "Reserved bill sequence");
        to_sequence(sequence)
    }

    #[instrument(skip(self, bill), fields(room_id = %bill.room_id))]
    async fn insert_bill(&self, bill: NewBill) -> Result<Bill, PortError> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.repository.gateway().begin().await?;

        let number = match bill.number {
            NumberAssignment::Allocate { day } => {
                let sequence =
                    BillRepository::next_sequence(&mut *tx, &day_key(day), &BillNumber::day_prefix(day)).await?;
                BillNumber::new(day, to_sequence(sequence)?)
                    .map_err(|e| PortError::storage(e.to_string()))?
            }
            NumberAssignment::Supplied(number) => {
                BillRepository::bump_sequence(
                    &mut *tx,
                    &day_key(number.date()),
                    &BillNumber::day_prefix(number.date()),
                    i64::from(number.sequence()),
                )
                .await?;
                number
            }
        };

        if !BillRepository::user_exists(&mut *tx, bill.created_by.value()).await? {
            return Err(PortError::not_found("User", bill.created_by));
        }

        if let Some(stay) = bill.exclusive_stay {
            if BillRepository::stay_overlaps(&mut *tx, bill.room_id.value(), stay.check_in, stay.check_out).await? {
                warn!(%stay, "Stay overlaps an existing bill");
                return Err(PortError::overlap(format!(
                    "{} overlaps an existing bill for {}",
                    stay, bill.room_id
                )));
            }
        }

        let row = NewBillRow {
            bill_number: number.to_string(),
            room_id: bill.room_id.value(),
            customer_name: bill.customer_name.clone(),
            customer_phone: bill.customer_phone.clone(),
            customer_address: bill.customer_address.clone(),
            check_in_date: bill.check_in_date,
            check_out_date: bill.check_out_date,
            total_days: bill.total_days,
            price_per_day: bill.price_per_day,
            total_amount: bill.total_amount,
            created_by: bill.created_by.value(),
            created_at: bill.created_at,
        };
        let id = BillRepository::insert(&mut *tx, &row).await?;
        tx.commit().await.map_err(DatabaseError::from)?;

        debug!(bill_id = id, bill_number = %number, "Bill inserted");
        Ok(bill.into_bill(BillId::new(id), number))
    }

    #[instrument(skip(self))]
    async fn list_bills(&self) -> Result<Vec<BillDetails>, PortError> {
        let rows = self.repository.list_with_details().await?;
        rows.into_iter().map(row_to_details).collect()
    }

    #[instrument(skip(self), fields(bill_id = %id))]
    async fn get_bill(&self, id: BillId) -> Result<Option<BillDetails>, PortError> {
        self.repository
            .get_with_details(id.value())
            .await?
            .map(row_to_details)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn bills_issued_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Bill>, PortError> {
        let until = to
            .succ_opt()
            .map(BillNumber::day_prefix)
            .unwrap_or_else(|| "VC".to_string());
        let rows = self
            .repository
            .list_by_number_range(&BillNumber::day_prefix(from), &until)
            .await?;
        rows.into_iter().map(row_to_bill).collect()
    }
}

fn day_key(day: NaiveDate) -> String {
    day.format("%Y%m%d").to_string()
}

fn to_sequence(value: i64) -> Result<u32, PortError> {
    u32::try_from(value).map_err(|_| PortError::storage(format!("bill sequence out of range: {}", value)))
}

fn row_to_bill(row: BillRow) -> Result<Bill, PortError> {
    let bill_number: BillNumber = row
        .bill_number
        .parse()
        .map_err(|_| PortError::from(DatabaseError::Decode(format!("bills.bill_number '{}'", row.bill_number))))?;
    let total_days = u32::try_from(row.total_days)
        .map_err(|_| PortError::from(DatabaseError::Decode(format!("bills.total_days {}", row.total_days))))?;

    Ok(Bill {
        id: BillId::new(row.id),
        bill_number,
        room_id: RoomId::new(row.room_id),
        price_per_day: parse_decimal("bills.price_per_day", &row.price_per_day)?,
        total_amount: parse_decimal("bills.total_amount", &row.total_amount)?,
        customer_name: row.customer_name,
        customer_phone: row.customer_phone,
        customer_address: row.customer_address,
        check_in_date: row.check_in_date,
        check_out_date: row.check_out_date,
        total_days,
        created_by: UserId::new(row.created_by),
        created_at: row.created_at,
    })
}

fn row_to_details(row: BillDetailsRow) -> Result<BillDetails, PortError> {
    Ok(BillDetails {
        bill: row_to_bill(row.bill)?,
        room_number: row.room_number,
        room_type: from_db_room_type(row.room_type),
        created_by_username: row.created_by_username,
    })
}
