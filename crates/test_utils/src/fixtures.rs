//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for rooms, users, dates and money. Values are
//! fixed so tests can assert exact bill numbers and totals.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{Clock, Currency, FixedClock, Money};
use domain_identity::{NewUser, Role};
use domain_rooms::{NewRoom, RoomType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Nightly rate of the standard AC room
    pub fn ac_rate() -> Decimal {
        dec!(8500.00)
    }

    /// Nightly rate of the standard non-AC room
    pub fn non_ac_rate() -> Decimal {
        dec!(5000.00)
    }

    pub fn lkr(amount: Decimal) -> Money {
        Money::new(amount, Currency::LKR)
    }
}

/// Fixture for calendar data
pub struct DateFixtures;

impl DateFixtures {
    /// The business date tests run on (Jan 15, 2024)
    pub fn business_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    pub fn check_in() -> NaiveDate {
        Self::business_day()
    }

    /// Three nights after check-in
    pub fn check_out() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 18).unwrap()
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// A clock pinned to noon UTC on the business day
    pub fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::on(Self::business_day()))
    }

    pub fn clock_on(date: NaiveDate) -> Arc<dyn Clock> {
        Arc::new(FixedClock::on(date))
    }
}

/// Fixture for rooms
pub struct RoomFixtures;

impl RoomFixtures {
    /// Room 101, AC, 8500.00 per night
    pub fn ac_101() -> NewRoom {
        NewRoom::new("101", RoomType::Ac, MoneyFixtures::ac_rate()).with_description("Sea view, queen bed")
    }

    /// Room 102, non-AC, 5000.00 per night
    pub fn non_ac_102() -> NewRoom {
        NewRoom::new("102", RoomType::NonAc, MoneyFixtures::non_ac_rate())
    }
}

/// Fixture for user accounts
pub struct UserFixtures;

impl UserFixtures {
    pub const ADMIN_USERNAME: &'static str = "admin";
    pub const ADMIN_PASSWORD: &'static str = "admin123";
    pub const CASHIER_USERNAME: &'static str = "cashier1";
    pub const CASHIER_PASSWORD: &'static str = "cash123";

    pub fn admin() -> NewUser {
        NewUser::new(Self::ADMIN_USERNAME, Self::ADMIN_PASSWORD, Role::Admin)
    }

    pub fn cashier() -> NewUser {
        NewUser::new(Self::CASHIER_USERNAME, Self::CASHIER_PASSWORD, Role::Cashier)
    }
}
