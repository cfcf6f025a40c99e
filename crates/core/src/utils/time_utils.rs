use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::MINUTES_PER_DAY;

/// Current local wall-clock time. Trade ledgers carry local exchange time,
/// so the engine compares them against local time as well.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Whole minutes between two instants (truncated toward zero).
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}

/// Elapsed days between two instants with minute resolution.
pub fn fractional_days_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    minutes_between(start, end) as f64 / MINUTES_PER_DAY
}

/// Whole days between two instants (truncated toward zero).
pub fn whole_days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_fractional_days_uses_minutes() {
        let days = fractional_days_between(at(2020, 1, 1, 0, 0), at(2020, 1, 2, 12, 0));
        assert!((days - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_whole_days_truncates() {
        assert_eq!(whole_days_between(at(2020, 1, 1, 0, 0), at(2020, 1, 2, 23, 59)), 1);
        assert_eq!(whole_days_between(at(2020, 1, 1, 0, 0), at(2020, 1, 1, 0, 0)), 0);
    }

    #[test]
    fn test_start_of_day() {
        let date = NaiveDate::from_ymd_opt(2021, 7, 14).unwrap();
        assert_eq!(start_of_day(date), at(2021, 7, 14, 0, 0));
    }
}
