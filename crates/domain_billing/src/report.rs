//! Revenue summary over issued bills

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;

use crate::bill::Bill;

/// Totals for bills issued within an inclusive date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub currency: Currency,
    pub bill_count: usize,
    pub billed_days: u64,
    pub revenue: Decimal,
}

impl RevenueSummary {
    /// Aggregates bills; the caller has already filtered them to the range
    pub fn from_bills(from: NaiveDate, to: NaiveDate, currency: Currency, bills: &[Bill]) -> Self {
        let (billed_days, revenue) = bills.iter().fold((0u64, Decimal::ZERO), |(days, total), bill| {
            (days + u64::from(bill.total_days), total + bill.total_amount)
        });

        Self {
            from,
            to,
            currency,
            bill_count: bills.len(),
            billed_days,
            revenue,
        }
    }

    /// Mean charge per bill, zero when nothing was billed
    pub fn average_bill(&self) -> Decimal {
        if self.bill_count == 0 {
            Decimal::ZERO
        } else {
            self.revenue / Decimal::from(self.bill_count)
        }
    }
}
