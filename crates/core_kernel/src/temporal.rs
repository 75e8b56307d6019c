//! Calendar and clock types
//!
//! Stays are measured in whole calendar days; time of day never matters.
//! The business date (used for bill numbering and reports) is taken in the
//! hotel's configured timezone through a [`Clock`].

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for the hotel's business date
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s)
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Returns the local calendar date of the given instant
    pub fn date_of(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid stay: check-out {check_out} must be after check-in {check_in}")]
    InvalidPeriod {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Whole calendar days from `check_in` to `check_out` (negative if reversed)
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// A half-open range of occupied nights, `[check_in, check_out)`
///
/// The check-out date itself is free for the next guest, so a stay ending on
/// the 18th does not overlap one starting on the 18th.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayPeriod {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayPeriod {
    /// Creates a stay; check-out must be strictly after check-in
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, TemporalError> {
        if check_out <= check_in {
            return Err(TemporalError::InvalidPeriod { check_in, check_out });
        }
        Ok(Self { check_in, check_out })
    }

    /// The range actually billed: a same-day stay occupies one night
    pub fn billed(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        let minimum = check_in.checked_add_days(Days::new(1)).unwrap_or(check_in);
        Self {
            check_in,
            check_out: check_out.max(minimum),
        }
    }

    /// Number of nights in the range
    pub fn nights(&self) -> i64 {
        nights_between(self.check_in, self.check_out)
    }

    /// Half-open overlap: `inA < outB && inB < outA`
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns true if the night starting on `date` falls inside the stay
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }
}

impl fmt::Display for StayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.check_in, self.check_out)
    }
}

/// Source of the current instant and business date
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate;
}

/// Wall clock in the hotel's timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: Timezone,
}

impl SystemClock {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        self.timezone.date_of(Utc::now())
    }
}

/// A clock pinned to one instant, for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    timezone: Timezone,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, timezone: Timezone) -> Self {
        Self { now, timezone }
    }

    /// Noon UTC on the given date
    pub fn on(date: NaiveDate) -> Self {
        let now = date
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        Self::new(now, Timezone::default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.timezone.date_of(self.now)
    }
}
