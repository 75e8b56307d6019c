//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than bare `assert!`.

use std::collections::HashSet;
use std::fmt::Debug;

use core_kernel::{Classify, ErrorKind};
use domain_billing::{Bill, BillNumber};
use rust_decimal::Decimal;

/// Asserts that a result failed with the given error kind
///
/// # Panics
///
/// Panics if the result is `Ok` or the error is of another kind
pub fn assert_error_kind<T: Debug, E: Classify + Debug>(result: &Result<T, E>, expected: ErrorKind) {
    match result {
        Ok(value) => panic!("Expected {} error, got Ok({:?})", expected, value),
        Err(e) => assert_eq!(e.kind(), expected, "Unexpected error kind for {:?}", e),
    }
}

/// Asserts days, rate and total of a bill
pub fn assert_bill_totals(bill: &Bill, days: u32, price_per_day: Decimal, total: Decimal) {
    assert_eq!(bill.total_days, days, "days of bill {}", bill.bill_number);
    assert_eq!(bill.price_per_day, price_per_day, "rate of bill {}", bill.bill_number);
    assert_eq!(bill.total_amount, total, "total of bill {}", bill.bill_number);
    assert_eq!(
        Decimal::from(bill.total_days) * bill.price_per_day,
        bill.total_amount,
        "total of bill {} is not days x rate",
        bill.bill_number
    );
}

/// Asserts that no bill number appears twice
pub fn assert_unique_numbers<'a>(numbers: impl IntoIterator<Item = &'a BillNumber>) {
    let mut seen = HashSet::new();
    for number in numbers {
        assert!(seen.insert(*number), "Bill number {} issued twice", number);
    }
}
