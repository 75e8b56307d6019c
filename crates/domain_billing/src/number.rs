//! Human-readable bill numbers
//!
//! Format: `VB` + issue date as `YYYYMMDD` + daily sequence padded to three
//! digits, e.g. `VB20240115001`. The format is printed on paper bills and
//! must stay stable.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::BillingError;

/// Prefix shared by every bill number
pub const BILL_NUMBER_PREFIX: &str = "VB";

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_LEN: usize = 8;
const MIN_SEQUENCE_DIGITS: usize = 3;

/// A bill number: issue date plus 1-based daily sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillNumber {
    date: NaiveDate,
    sequence: u32,
}

impl BillNumber {
    pub fn new(date: NaiveDate, sequence: u32) -> Result<Self, BillingError> {
        if sequence == 0 {
            return Err(BillingError::InvalidBillNumber(
                "sequence starts at 1".to_string(),
            ));
        }
        Ok(Self { date, sequence })
    }

    /// The business date the number was issued on
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The `VBYYYYMMDD` prefix shared by all numbers issued on `date`
    pub fn day_prefix(date: NaiveDate) -> String {
        format!("{}{}", BILL_NUMBER_PREFIX, date.format(DATE_FORMAT))
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", Self::day_prefix(self.date), self.sequence)
    }
}

impl FromStr for BillNumber {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BillingError::InvalidBillNumber(s.to_string());

        let rest = s.strip_prefix(BILL_NUMBER_PREFIX).ok_or_else(invalid)?;
        if !rest.is_ascii() || rest.len() < DATE_LEN + MIN_SEQUENCE_DIGITS {
            return Err(invalid());
        }

        let (date_part, sequence_part) = rest.split_at(DATE_LEN);
        if !sequence_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // padding stops at three digits, so a longer sequence never starts with 0
        if sequence_part.len() > MIN_SEQUENCE_DIGITS && sequence_part.starts_with('0') {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| invalid())?;
        let sequence: u32 = sequence_part.parse().map_err(|_| invalid())?;

        BillNumber::new(date, sequence).map_err(|_| invalid())
    }
}

impl Serialize for BillNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BillNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_format_pads_sequence() {
        assert_eq!(BillNumber::new(jan_15(), 1).unwrap().to_string(), "VB20240115001");
        assert_eq!(BillNumber::new(jan_15(), 42).unwrap().to_string(), "VB20240115042");
    }

    #[test]
    fn test_sequence_beyond_999_widens() {
        let number = BillNumber::new(jan_15(), 1000).unwrap();
        assert_eq!(number.to_string(), "VB202401151000");
        assert_eq!(number.to_string().parse::<BillNumber>().unwrap(), number);
    }

    #[test]
    fn test_parse() {
        let number: BillNumber = "VB20240115002".parse().unwrap();
        assert_eq!(number.date(), jan_15());
        assert_eq!(number.sequence(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "VB",
            "XB20240115001",
            "VB2024011500",
            "VB20241315001",
            "VB20240115000",
            "VB2024011500a",
            "VB20240115+01",
            "VB202401150007",
            "VB2024011500001",
        ] {
            assert!(bad.parse::<BillNumber>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_parsed_text_displays_unchanged() {
        for text in ["VB20240115001", "VB20240115999", "VB202401151000", "VB2024011512345"] {
            let number: BillNumber = text.parse().unwrap();
            assert_eq!(number.to_string(), text);
        }
    }

    #[test]
    fn test_ordering_follows_date_then_sequence() {
        let a = BillNumber::new(jan_15(), 9).unwrap();
        let b = BillNumber::new(jan_15(), 10).unwrap();
        let c = BillNumber::new(jan_15().succ_opt().unwrap(), 1).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_serde_as_string() {
        let number = BillNumber::new(jan_15(), 7).unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), "\"VB20240115007\"");
    }
}
