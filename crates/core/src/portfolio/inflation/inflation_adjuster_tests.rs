#[cfg(test)]
mod tests {
    use crate::constants::DAYS_PER_MONTH;
    use crate::market_data::InflationTable;
    use crate::portfolio::income::Payment;
    use crate::portfolio::inflation::InflationAdjuster;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::BTreeMap;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// 2020: twelve months at 1%, 2021: three months at 2%.
    fn table() -> InflationTable {
        let mut years = BTreeMap::new();
        years.insert(2020, vec![1.0; 12]);
        years.insert(2021, vec![2.0, 2.0, 2.0]);
        InflationTable::from_years(years)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_daily_rate_within_one_month() {
        let table = table();
        let adjuster = InflationAdjuster::new(&table);
        let rate = adjuster.daily_rate(at(2020, 3, 1), at(2020, 3, 20));
        assert!(close(rate, 1.0 / DAYS_PER_MONTH));
    }

    #[test]
    fn test_daily_rate_spans_year_boundary() {
        let table = table();
        let adjuster = InflationAdjuster::new(&table);
        // Nov, Dec 2020 at 1%, Jan, Feb 2021 at 2%.
        let rate = adjuster.daily_rate(at(2020, 11, 15), at(2021, 2, 10));
        assert!(close(rate, 6.0 / (4.0 * DAYS_PER_MONTH)));
    }

    #[test]
    fn test_daily_rate_unknown_start_is_zero() {
        let table = table();
        let adjuster = InflationAdjuster::new(&table);
        assert_eq!(adjuster.daily_rate(at(2019, 6, 1), at(2020, 6, 1)), 0.0);
        // April 2021 is past the last known month of 2021.
        assert_eq!(adjuster.daily_rate(at(2021, 4, 1), at(2021, 5, 1)), 0.0);
    }

    #[test]
    fn test_daily_rate_clamps_end_to_latest_known_month() {
        let table = table();
        let adjuster = InflationAdjuster::new(&table);
        // End year absent: clamp to March 2021.
        let absent = adjuster.daily_rate(at(2021, 1, 1), at(2023, 8, 1));
        assert!(close(absent, 6.0 / (3.0 * DAYS_PER_MONTH)));
        // End month beyond the known months of a present year.
        let partial = adjuster.daily_rate(at(2021, 2, 1), at(2021, 11, 1));
        assert!(close(partial, 4.0 / (2.0 * DAYS_PER_MONTH)));
    }

    #[test]
    fn test_daily_rate_with_empty_table_is_zero() {
        let table = InflationTable::default();
        let adjuster = InflationAdjuster::new(&table);
        assert_eq!(adjuster.daily_rate(at(2020, 1, 1), at(2020, 2, 1)), 0.0);
    }

    #[test]
    fn test_advance_with_zero_elapsed_time_is_identity() {
        let table = table();
        let adjuster = InflationAdjuster::new(&table);
        let t = at(2020, 5, 5);
        assert_eq!(adjuster.advance(1234.5, t, t), 1234.5);
    }

    #[test]
    fn test_advance_compounds_once_over_interval() {
        let table = table();
        let adjuster = InflationAdjuster::new(&table);
        // Ten days inside March 2020.
        let advanced = adjuster.advance(1000.0, at(2020, 3, 1), at(2020, 3, 11));
        let expected = 1000.0 * (1.0 + (1.0 / DAYS_PER_MONTH) / 100.0 * 10.0);
        assert!(close(advanced, expected));
    }

    #[test]
    fn test_payment_is_deducted_after_advancing() {
        let table = table();
        let adjuster = InflationAdjuster::new(&table);
        let payment = Payment::new(at(2020, 3, 11), 100, 3.0, 13.0);
        let balance = adjuster.apply_payment_and_advance(1000.0, at(2020, 3, 1), &payment);
        let expected = adjuster.advance(1000.0, at(2020, 3, 1), at(2020, 3, 11)) - 261.0;
        assert!(close(balance, expected));
    }
}
