#[cfg(test)]
mod tests {
    use crate::market_data::{DividendEvent, DividendSeries, InflationTable};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::BTreeMap;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn table(entries: &[(i32, usize, f64)]) -> InflationTable {
        let mut years = BTreeMap::new();
        for (year, months, rate) in entries {
            years.insert(*year, vec![*rate; *months]);
        }
        InflationTable::from_years(years)
    }

    #[test]
    fn test_rate_lookup_is_one_based() {
        let mut years = BTreeMap::new();
        years.insert(2021, vec![0.1, 0.2, 0.3]);
        let table = InflationTable::from_years(years);

        assert_eq!(table.rate(2021, 1), Some(0.1));
        assert_eq!(table.rate(2021, 3), Some(0.3));
        assert_eq!(table.rate(2021, 4), None);
        assert_eq!(table.rate(2021, 0), None);
        assert_eq!(table.rate(2020, 1), None);
        assert_eq!(table.months_in(2021), 3);
        assert_eq!(table.months_in(2019), 0);
    }

    #[test]
    fn test_extra_estimate_extends_partial_year() {
        let table = table(&[(2020, 12, 0.5), (2021, 7, 0.4)]).with_extra_estimate(0.9);
        assert_eq!(table.months_in(2021), 8);
        assert_eq!(table.rate(2021, 8), Some(0.9));
        assert_eq!(table.latest_year(), Some(2021));
    }

    #[test]
    fn test_extra_estimate_starts_new_year_when_latest_complete() {
        let table = table(&[(2020, 12, 0.5), (2021, 12, 0.4)]).with_extra_estimate(1.1);
        assert_eq!(table.latest_year(), Some(2022));
        assert_eq!(table.months_in(2022), 1);
        assert_eq!(table.rate(2022, 1), Some(1.1));
    }

    #[test]
    fn test_extra_estimate_on_empty_table_is_noop() {
        let table = InflationTable::default().with_extra_estimate(1.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_years_desc_iterates_most_recent_first() {
        let table = table(&[(2019, 12, 0.1), (2021, 2, 0.3), (2020, 12, 0.2)]);
        let years: Vec<i32> = table.years_desc().map(|(year, _)| year).collect();
        assert_eq!(years, vec![2021, 2020, 2019]);
    }

    #[test]
    fn test_validate_allows_only_latest_partial_year() {
        assert!(table(&[(2020, 12, 0.5), (2021, 3, 0.4)]).validate().is_ok());
        assert!(table(&[(2020, 11, 0.5), (2021, 3, 0.4)]).validate().is_err());
        assert!(table(&[(2020, 13, 0.5)]).validate().is_err());
        assert!(table(&[(2020, 12, f64::INFINITY)]).validate().is_err());
    }

    #[test]
    fn test_dividend_series_sorts_and_keeps_ties_in_order() {
        let series = DividendSeries::new(vec![
            DividendEvent::new(day(2021, 7, 1), 2.0),
            DividendEvent::new(day(2020, 7, 1), 1.0),
            DividendEvent::new(day(2021, 7, 1), 3.0),
        ]);
        let dividends: Vec<f64> = series.events().iter().map(|e| e.dividend_per_share).collect();
        assert_eq!(dividends, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_dividend_series_from_pairs_truncates_to_shorter_column() {
        let series = DividendSeries::from_pairs(&[day(2020, 1, 1), day(2021, 1, 1)], &[1.5]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.events()[0].dividend_per_share, 1.5);
    }
}
