//! Unit tests for stay periods, night counting and clocks

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{nights_between, Clock, FixedClock, StayPeriod, TemporalError, Timezone};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod stay_period {
    use super::*;

    #[test]
    fn test_new_accepts_checkout_after_checkin() {
        let period = StayPeriod::new(date(2024, 1, 15), date(2024, 1, 18)).unwrap();
        assert_eq!(period.nights(), 3);
    }

    #[test]
    fn test_new_rejects_same_day() {
        let result = StayPeriod::new(date(2024, 1, 15), date(2024, 1, 15));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_new_rejects_reversed_dates() {
        let result = StayPeriod::new(date(2024, 1, 18), date(2024, 1, 15));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_overlap_is_half_open() {
        let booked = StayPeriod::new(date(2024, 3, 10), date(2024, 3, 12)).unwrap();

        let inside = StayPeriod::new(date(2024, 3, 11), date(2024, 3, 12)).unwrap();
        let ends_on_checkin = StayPeriod::new(date(2024, 3, 8), date(2024, 3, 10)).unwrap();
        let starts_on_checkout = StayPeriod::new(date(2024, 3, 12), date(2024, 3, 14)).unwrap();
        let covering = StayPeriod::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();

        assert!(booked.overlaps(&inside));
        assert!(booked.overlaps(&covering));
        assert!(!booked.overlaps(&ends_on_checkin));
        assert!(!booked.overlaps(&starts_on_checkout));
    }

    #[test]
    fn test_billed_keeps_longer_stays() {
        let period = StayPeriod::billed(date(2024, 1, 15), date(2024, 1, 18));
        assert_eq!(period.check_out, date(2024, 1, 18));
        assert_eq!(period.nights(), 3);
    }

    #[test]
    fn test_nights_between_across_month_and_leap_day() {
        assert_eq!(nights_between(date(2024, 2, 27), date(2024, 3, 2)), 4);
        assert_eq!(nights_between(date(2023, 12, 31), date(2024, 1, 1)), 1);
    }
}

mod clocks {
    use super::*;

    #[test]
    fn test_fixed_clock_on_date() {
        let clock = FixedClock::on(date(2024, 1, 15));
        assert_eq!(clock.today(), date(2024, 1, 15));
    }

    #[test]
    fn test_timezone_rejects_unknown_name() {
        let result = "Mars/Olympus".parse::<Timezone>();
        assert!(matches!(result, Err(TemporalError::UnknownTimezone(_))));
    }

    #[test]
    fn test_timezone_serde_roundtrip_uses_iana_name() {
        let tz: Timezone = "Asia/Kolkata".parse().unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Asia/Kolkata\"");
    }

    #[test]
    fn test_date_of_late_utc_evening() {
        let tz: Timezone = "Asia/Kolkata".parse().unwrap();
        let instant: DateTime<Utc> = "2024-01-14T19:00:00Z".parse().unwrap();
        assert_eq!(tz.date_of(instant), date(2024, 1, 15));
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            a_start in 0u64..60, a_len in 1u64..20,
            b_start in 0u64..60, b_len in 1u64..20
        ) {
            let base = date(2024, 1, 1);
            let a = StayPeriod::new(
                base + chrono::Days::new(a_start),
                base + chrono::Days::new(a_start + a_len),
            ).unwrap();
            let b = StayPeriod::new(
                base + chrono::Days::new(b_start),
                base + chrono::Days::new(b_start + b_len),
            ).unwrap();
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn billed_period_has_at_least_one_night(offset in -30i64..30) {
            let check_in = date(2024, 6, 1);
            let check_out = check_in + chrono::Duration::days(offset);
            let period = StayPeriod::billed(check_in, check_out);
            prop_assert_eq!(period.nights(), offset.max(1));
        }
    }
}
