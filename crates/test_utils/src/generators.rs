//! Test Data Generators
//!
//! Proptest strategies for stays and rates, and `fake`-based customer data
//! for scenario tests that need many distinct bills.

use chrono::{Days, NaiveDate};
use core_kernel::RoomId;
use domain_billing::CreateBillRequest;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::BillRequestBuilder;

/// Strategy for dates within 2020-2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .and_then(|d| d.checked_add_days(Days::new(offset)))
            .unwrap_or(NaiveDate::MIN)
    })
}

/// Strategy for (check-in, check-out) pairs, check-out on or after check-in
pub fn stay_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0u64..60u64).prop_map(|(check_in, nights)| {
        let check_out = check_in.checked_add_days(Days::new(nights)).unwrap_or(check_in);
        (check_in, check_out)
    })
}

/// Strategy for positive nightly rates with two decimal places
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

pub fn fake_customer_name() -> String {
    Name().fake()
}

pub fn fake_phone() -> String {
    PhoneNumber().fake()
}

pub fn fake_address() -> String {
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    format!("{}, {}", street, city)
}

/// A bill request with a fake customer for the given room and stay
pub fn fake_bill_request(room_id: RoomId, check_in: NaiveDate, nights: u64) -> CreateBillRequest {
    let check_out = check_in.checked_add_days(Days::new(nights)).unwrap_or(check_in);
    let phone = fake_phone();
    let address = fake_address();
    BillRequestBuilder::new(room_id)
        .customer(fake_customer_name())
        .phone(Some(&phone))
        .address(Some(&address))
        .stay(check_in, check_out)
        .build()
}
