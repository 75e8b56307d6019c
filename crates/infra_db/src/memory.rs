//! In-memory store
//!
//! Implements every domain port over plain collections behind one mutex,
//! for demo/offline runs and tests. It enforces the same constraints as the
//! SQLite schema: unique usernames and bill numbers, unique room numbers
//! among active rooms, and references from bills to rooms and users.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use core_kernel::{
    AdapterHealth, BillId, DomainPort, HealthCheckResult, HealthCheckable, PortError, RoomId, StayPeriod, UserId,
};
use domain_billing::{Bill, BillDetails, BillNumber, BillPort, NewBill, NumberAssignment};
use domain_identity::{NewUserRecord, Role, User, UserPort, UserRecord};
use domain_rooms::{NewRoom, Room, RoomPort, RoomUpdate};

#[derive(Debug, Default)]
struct MemoryState {
    rooms: BTreeMap<i64, Room>,
    bills: BTreeMap<i64, Bill>,
    users: BTreeMap<i64, UserRecord>,
    sequences: HashMap<NaiveDate, u32>,
    next_room_id: i64,
    next_bill_id: i64,
    next_user_id: i64,
}

impl MemoryState {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn active_number_taken(&self, room_number: &str, except: Option<RoomId>) -> bool {
        self.rooms
            .values()
            .any(|r| r.is_active && r.room_number == room_number && Some(r.id) != except)
    }

    /// Highest sequence already used by stored bills for `day`
    fn max_stored_sequence(&self, day: NaiveDate) -> u32 {
        self.bills
            .values()
            .filter(|b| b.bill_number.date() == day)
            .map(|b| b.bill_number.sequence())
            .max()
            .unwrap_or(0)
    }

    fn allocate(&mut self, day: NaiveDate) -> u32 {
        let seeded = self.max_stored_sequence(day);
        let entry = self.sequences.entry(day).or_insert(seeded);
        *entry += 1;
        *entry
    }

    fn bump(&mut self, number: BillNumber) {
        let seeded = self.max_stored_sequence(number.date());
        let entry = self.sequences.entry(number.date()).or_insert(seeded);
        *entry = (*entry).max(number.sequence());
    }

    fn overlaps(&self, room_id: RoomId, period: &StayPeriod) -> bool {
        self.bills
            .values()
            .any(|b| b.room_id == room_id && b.stay().overlaps(period))
    }

    fn details(&self, bill: &Bill) -> Result<BillDetails, PortError> {
        let room = self
            .rooms
            .get(&bill.room_id.value())
            .ok_or_else(|| PortError::storage(format!("bill {} references missing {}", bill.id, bill.room_id)))?;
        let user = self
            .users
            .get(&bill.created_by.value())
            .ok_or_else(|| PortError::storage(format!("bill {} references missing {}", bill.id, bill.created_by)))?;

        Ok(BillDetails {
            bill: bill.clone(),
            room_number: room.room_number.clone(),
            room_type: room.room_type,
            created_by_username: user.username.clone(),
        })
    }
}

/// All ports in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for MemoryStore {}

#[async_trait]
impl HealthCheckable for MemoryStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "memory-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: None,
            checked_at: Utc::now(),
        }
    }
}

// ============================================================================
// Rooms
// ============================================================================

#[async_trait]
impl RoomPort for MemoryStore {
    async fn list_active(&self) -> Result<Vec<Room>, PortError> {
        let state = self.state.lock().await;
        let mut rooms: Vec<Room> = state.rooms.values().filter(|r| r.is_active).cloned().collect();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number).then(a.id.cmp(&b.id)));
        Ok(rooms)
    }

    async fn get_room(&self, id: RoomId) -> Result<Room, PortError> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(&id.value())
            .cloned()
            .ok_or_else(|| PortError::not_found("Room", id))
    }

    async fn find_active_by_number(&self, room_number: &str) -> Result<Option<Room>, PortError> {
        let state = self.state.lock().await;
        Ok(state
            .rooms
            .values()
            .find(|r| r.is_active && r.room_number == room_number)
            .cloned())
    }

    async fn has_overlapping_bill(&self, id: RoomId, period: StayPeriod) -> Result<bool, PortError> {
        let state = self.state.lock().await;
        Ok(state.overlaps(id, &period))
    }

    async fn insert(&self, room: NewRoom, now: DateTime<Utc>) -> Result<Room, PortError> {
        let mut state = self.state.lock().await;
        if state.active_number_taken(&room.room_number, None) {
            return Err(PortError::duplicate(format!("active room number '{}'", room.room_number)));
        }

        let id = MemoryState::next_id(&mut state.next_room_id);
        let stored = Room {
            id: RoomId::new(id),
            room_number: room.room_number,
            room_type: room.room_type,
            price_per_night: room.price_per_night,
            description: room.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.rooms.insert(id, stored.clone());
        debug!(room_id = id, "Room stored in memory");
        Ok(stored)
    }

    async fn update(&self, id: RoomId, update: RoomUpdate, now: DateTime<Utc>) -> Result<Room, PortError> {
        let mut state = self.state.lock().await;
        let is_active = state
            .rooms
            .get(&id.value())
            .map(|r| r.is_active)
            .ok_or_else(|| PortError::not_found("Room", id))?;

        if let Some(number) = &update.room_number {
            if is_active && state.active_number_taken(number, Some(id)) {
                return Err(PortError::duplicate(format!("active room number '{}'", number)));
            }
        }

        let room = state
            .rooms
            .get_mut(&id.value())
            .ok_or_else(|| PortError::not_found("Room", id))?;
        update.apply_to(room, now);
        Ok(room.clone())
    }

    async fn deactivate(&self, id: RoomId, now: DateTime<Utc>) -> Result<bool, PortError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(&id.value())
            .ok_or_else(|| PortError::not_found("Room", id))?;
        if !room.is_active {
            return Ok(false);
        }
        room.is_active = false;
        room.updated_at = now;
        Ok(true)
    }
}

// ============================================================================
// Bills
// ============================================================================

#[async_trait]
impl BillPort for MemoryStore {
    async fn reserve_number(&self, day: NaiveDate) -> Result<u32, PortError> {
        let mut state = self.state.lock().await;
        Ok(state.allocate(day))
    }

    async fn insert_bill(&self, bill: NewBill) -> Result<Bill, PortError> {
        let mut state = self.state.lock().await;

        if !state.rooms.contains_key(&bill.room_id.value()) {
            return Err(PortError::not_found("Room", bill.room_id));
        }
        if !state.users.contains_key(&bill.created_by.value()) {
            return Err(PortError::not_found("User", bill.created_by));
        }
        if let NumberAssignment::Supplied(number) = bill.number {
            if state.bills.values().any(|b| b.bill_number == number) {
                return Err(PortError::duplicate(format!("bill number {}", number)));
            }
        }
        if let Some(stay) = bill.exclusive_stay {
            if state.overlaps(bill.room_id, &stay) {
                return Err(PortError::overlap(format!(
                    "{} overlaps an existing bill for {}",
                    stay, bill.room_id
                )));
            }
        }

        let number = match bill.number {
            NumberAssignment::Allocate { day } => {
                let sequence = state.allocate(day);
                BillNumber::new(day, sequence).map_err(|e| PortError::storage(e.to_string()))?
            }
            NumberAssignment::Supplied(number) => {
                state.bump(number);
                number
            }
        };

        let id = MemoryState::next_id(&mut state.next_bill_id);
        let stored = bill.into_bill(BillId::new(id), number);
        state.bills.insert(id, stored.clone());
        debug!(bill_id = id, bill_number = %number, "Bill stored in memory");
        Ok(stored)
    }

    async fn list_bills(&self) -> Result<Vec<BillDetails>, PortError> {
        let state = self.state.lock().await;
        let mut bills: Vec<&Bill> = state.bills.values().collect();
        bills.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        bills.into_iter().map(|b| state.details(b)).collect()
    }

    async fn get_bill(&self, id: BillId) -> Result<Option<BillDetails>, PortError> {
        let state = self.state.lock().await;
        state.bills.get(&id.value()).map(|b| state.details(b)).transpose()
    }

    async fn bills_issued_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Bill>, PortError> {
        let state = self.state.lock().await;
        let mut bills: Vec<Bill> = state
            .bills
            .values()
            .filter(|b| (from..=to).contains(&b.bill_number.date()))
            .cloned()
            .collect();
        bills.sort_by_key(|b| b.bill_number);
        Ok(bills)
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserPort for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, PortError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, PortError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id.value()).cloned())
    }

    async fn exists_with_role(&self, role: Role) -> Result<bool, PortError> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|u| u.role == role))
    }

    async fn insert(&self, user: NewUserRecord, now: DateTime<Utc>) -> Result<User, PortError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.username == user.username) {
            return Err(PortError::duplicate(format!("username '{}'", user.username)));
        }

        let id = MemoryState::next_id(&mut state.next_user_id);
        let record = UserRecord {
            id: UserId::new(id),
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
        };
        let public = record.to_user();
        state.users.insert(id, record);
        Ok(public)
    }

    async fn list(&self) -> Result<Vec<User>, PortError> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state.users.values().map(UserRecord::to_user).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update_password(&self, id: UserId, password_hash: String) -> Result<bool, PortError> {
        let mut state = self.state.lock().await;
        match state.users.get_mut(&id.value()) {
            Some(user) => {
                user.password_hash = password_hash;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, PortError> {
        let mut state = self.state.lock().await;
        if state.bills.values().any(|b| b.created_by == id) {
            return Err(PortError::conflict(format!("{} is referenced by bills", id)));
        }
        Ok(state.users.remove(&id.value()).is_some())
    }
}
