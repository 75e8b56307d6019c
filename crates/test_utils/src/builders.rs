//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::NaiveDate;
use core_kernel::RoomId;
use domain_billing::CreateBillRequest;
use domain_rooms::{NewRoom, RoomType};
use rust_decimal::Decimal;

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Builder for bill creation requests
#[derive(Debug, Clone)]
pub struct BillRequestBuilder {
    room_id: RoomId,
    customer_name: String,
    customer_phone: Option<String>,
    customer_address: Option<String>,
    check_in: NaiveDate,
    check_out: NaiveDate,
    price_per_day: Option<Decimal>,
    bill_number: Option<String>,
}

impl BillRequestBuilder {
    /// A three-night stay from the business day for the given room
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            customer_name: "Nimal Perera".to_string(),
            customer_phone: Some("0771234567".to_string()),
            customer_address: Some("12 Galle Road, Colombo".to_string()),
            check_in: DateFixtures::check_in(),
            check_out: DateFixtures::check_out(),
            price_per_day: None,
            bill_number: None,
        }
    }

    pub fn customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    pub fn phone(mut self, phone: Option<&str>) -> Self {
        self.customer_phone = phone.map(str::to_string);
        self
    }

    pub fn address(mut self, address: Option<&str>) -> Self {
        self.customer_address = address.map(str::to_string);
        self
    }

    pub fn stay(mut self, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        self.check_in = check_in;
        self.check_out = check_out;
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price_per_day = Some(price);
        self
    }

    pub fn bill_number(mut self, number: impl Into<String>) -> Self {
        self.bill_number = Some(number.into());
        self
    }

    pub fn build(self) -> CreateBillRequest {
        CreateBillRequest {
            room_id: self.room_id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            check_in_date: self.check_in,
            check_out_date: self.check_out,
            price_per_day: self.price_per_day,
            bill_number: self.bill_number,
        }
    }
}

/// Builder for new rooms
#[derive(Debug, Clone)]
pub struct RoomBuilder {
    number: String,
    room_type: RoomType,
    price: Decimal,
    description: Option<String>,
}

impl RoomBuilder {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            room_type: RoomType::Ac,
            price: MoneyFixtures::ac_rate(),
            description: None,
        }
    }

    pub fn non_ac(mut self) -> Self {
        self.room_type = RoomType::NonAc;
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> NewRoom {
        let room = NewRoom::new(self.number, self.room_type, self.price);
        match self.description {
            Some(description) => room.with_description(description),
            None => room,
        }
    }
}
