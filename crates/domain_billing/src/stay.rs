//! Stay length and charge

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::nights_between;

/// Days billed and the resulting charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayCharge {
    pub days: u32,
    pub price_per_day: Decimal,
    pub total: Decimal,
}

/// Whole days between the dates, never less than one, times the rate
///
/// A same-day stay (or reversed dates) bills a single day. Callers that
/// must reject reversed dates do so before calling.
pub fn compute_stay(check_in: NaiveDate, check_out: NaiveDate, price_per_day: Decimal) -> StayCharge {
    let days = nights_between(check_in, check_out).clamp(1, i64::from(u32::MAX)) as u32;
    StayCharge {
        days,
        price_per_day,
        total: Decimal::from(days) * price_per_day,
    }
}
