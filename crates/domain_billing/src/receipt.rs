//! Bill receipt renderer
//!
//! Renders a bill as fixed-width plain text for receipt printers or a
//! print preview.

use core_kernel::{Currency, Money, Timezone};

use crate::bill::BillDetails;

/// Common widths: 32 characters for 58mm paper, 48 for 80mm
pub const DEFAULT_RECEIPT_WIDTH: usize = 48;

const MIN_WIDTH: usize = 24;

/// Plain-text bill renderer
#[derive(Debug, Clone)]
pub struct BillRenderer {
    width: usize,
    currency: Currency,
    timezone: Timezone,
    hotel_name: String,
}

impl BillRenderer {
    pub fn new(width: usize, currency: Currency, timezone: Timezone, hotel_name: impl Into<String>) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            currency,
            timezone,
            hotel_name: hotel_name.into(),
        }
    }

    /// Render a bill to text, one line per row, newline-terminated
    pub fn render(&self, details: &BillDetails) -> String {
        let mut out = String::new();

        self.render_header(&mut out, details);
        self.render_customer(&mut out, details);
        self.render_stay(&mut out, details);
        self.render_footer(&mut out, details);

        out
    }

    fn render_header(&self, out: &mut String, details: &BillDetails) {
        let bill = &details.bill;

        self.centered(out, &self.hotel_name.to_uppercase());
        self.centered(out, "ROOM BILL");
        self.separator(out, '=');

        self.pair(out, "Bill No", &bill.bill_number.to_string());
        let issued = self.timezone.to_local(bill.created_at).format("%Y-%m-%d %H:%M");
        self.pair(out, "Date", &issued.to_string());
        self.pair(out, "Cashier", &details.created_by_username);
        self.separator(out, '-');
    }

    fn render_customer(&self, out: &mut String, details: &BillDetails) {
        let bill = &details.bill;

        self.pair(out, "Customer", &bill.customer_name);
        if let Some(phone) = &bill.customer_phone {
            self.pair(out, "Phone", phone);
        }
        if let Some(address) = &bill.customer_address {
            self.pair(out, "Address", address);
        }
        self.separator(out, '-');
    }

    fn render_stay(&self, out: &mut String, details: &BillDetails) {
        let bill = &details.bill;

        self.pair(
            out,
            "Room",
            &format!("{} ({})", details.room_number, details.room_type.label()),
        );
        self.pair(out, "Check-in", &bill.check_in_date.to_string());
        self.pair(out, "Check-out", &bill.check_out_date.to_string());
        self.pair(out, "Days", &bill.total_days.to_string());
        self.pair(out, "Rate / day", &self.money(bill.price_per_day));
        self.separator(out, '=');
    }

    fn render_footer(&self, out: &mut String, details: &BillDetails) {
        self.pair(out, "TOTAL", &self.money(details.bill.total_amount));
        self.separator(out, '=');
        self.centered(out, "Thank you for staying with us!");
    }

    fn money(&self, amount: rust_decimal::Decimal) -> String {
        Money::new(amount, self.currency).round_to_currency().to_string()
    }

    fn separator(&self, out: &mut String, ch: char) {
        out.extend(std::iter::repeat(ch).take(self.width));
        out.push('\n');
    }

    fn centered(&self, out: &mut String, text: &str) {
        let len = text.chars().count();
        if len >= self.width {
            out.push_str(text);
        } else {
            let pad = (self.width - len) / 2;
            out.extend(std::iter::repeat(' ').take(pad));
            out.push_str(text);
        }
        out.push('\n');
    }

    /// Label on the left, value right-aligned; long values wrap below
    fn pair(&self, out: &mut String, label: &str, value: &str) {
        let label = format!("{}:", label);
        let used = label.chars().count() + value.chars().count();

        if used < self.width {
            out.push_str(&label);
            out.extend(std::iter::repeat(' ').take(self.width - used));
            out.push_str(value);
            out.push('\n');
        } else {
            out.push_str(&label);
            out.push('\n');
            out.push_str("  ");
            out.push_str(value);
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::Bill;
    use crate::number::BillNumber;
    use chrono::{NaiveDate, TimeZone, Utc};
    use core_kernel::{BillId, RoomId, UserId};
    use domain_rooms::RoomType;
    use rust_decimal_macros::dec;

    fn sample() -> BillDetails {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        BillDetails {
            bill: Bill {
                id: BillId::new(1),
                bill_number: BillNumber::new(day, 1).unwrap(),
                room_id: RoomId::new(1),
                customer_name: "Nimal Perera".to_string(),
                customer_phone: Some("0771234567".to_string()),
                customer_address: None,
                check_in_date: day,
                check_out_date: NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
                total_days: 3,
                price_per_day: dec!(8500),
                total_amount: dec!(25500),
                created_by: UserId::new(1),
                created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            },
            room_number: "101".to_string(),
            room_type: RoomType::Ac,
            created_by_username: "admin".to_string(),
        }
    }

    #[test]
    fn test_render_contains_bill_fields() {
        let colombo: Timezone = "Asia/Colombo".parse().unwrap();
        let text = BillRenderer::new(40, Currency::LKR, colombo, "Sea Breeze").render(&sample());

        assert!(text.contains("SEA BREEZE"));
        assert!(text.contains("VB20240115001"));
        assert!(text.contains("2024-01-15 15:00"));
        assert!(text.contains("101 (AC)"));
        assert!(text.contains("Rs. 8500.00"));
        assert!(text.contains("Rs. 25500.00"));
        assert!(text.contains("0771234567"));
        assert!(!text.contains("Address"));
    }

    #[test]
    fn test_lines_fit_width() {
        let text = BillRenderer::new(32, Currency::LKR, Timezone::default(), "Hotel").render(&sample());
        for line in text.lines() {
            assert!(line.chars().count() <= 32, "line too wide: {:?}", line);
        }
    }

    #[test]
    fn test_long_value_wraps() {
        let mut details = sample();
        details.bill.customer_address = Some("No. 12, Galle Road, Colombo 03, Western Province".to_string());
        let text = BillRenderer::new(32, Currency::LKR, Timezone::default(), "Hotel").render(&details);
        assert!(text.contains("Address:\n  No. 12"));
    }
}
