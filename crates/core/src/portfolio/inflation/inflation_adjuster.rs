//! Inflation adjustment of invested cash.
//!
//! Monthly rates are spread uniformly over an average month of
//! [`DAYS_PER_MONTH`] days and compounded once over the whole interval. This
//! is a deliberate approximation, not a day-weighted integral.

use chrono::{Datelike, NaiveDateTime};
use log::{debug, warn};

use crate::constants::{DAYS_PER_MONTH, MINUTES_PER_DAY, MONTHS_PER_YEAR};
use crate::market_data::InflationTable;
use crate::portfolio::income::Payment;
use crate::utils::time_utils::minutes_between;

#[derive(Debug, Clone, Copy)]
pub struct InflationAdjuster<'a> {
    table: &'a InflationTable,
}

impl<'a> InflationAdjuster<'a> {
    pub fn new(table: &'a InflationTable) -> Self {
        Self { table }
    }

    /// Average daily inflation, percent, over the calendar months spanned by
    /// `start` and `end` (both inclusive).
    ///
    /// Returns 0 when the start month is not covered by the table. An end
    /// beyond the table is clamped to the last known month.
    pub fn daily_rate(&self, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
        let (mut year, mut month) = (start.year(), start.month());
        if !self.table.contains_year(year) || month as usize > self.table.months_in(year) {
            debug!("No inflation data for {}-{:02}, assuming 0%", year, month);
            return 0.0;
        }

        let (end_year, end_month) = if self.table.contains_year(end.year()) {
            let known = self.table.months_in(end.year()) as u32;
            (end.year(), end.month().min(known))
        } else {
            match self.table.latest_year() {
                Some(latest) => (latest, self.table.months_in(latest) as u32),
                None => return 0.0,
            }
        };

        if (year, month) > (end_year, end_month) {
            return 0.0;
        }

        let mut accumulated = 0.0;
        let mut months = 0u32;
        loop {
            if month as usize > MONTHS_PER_YEAR {
                month = 1;
                year += 1;
            }
            match self.table.rate(year, month) {
                Some(rate) => accumulated += rate,
                None => {
                    warn!(
                        "Inflation table has a gap at {}-{:02}, assuming 0% for {} .. {}",
                        year, month, start, end
                    );
                    return 0.0;
                }
            }
            months += 1;
            if year == end_year && month == end_month {
                break;
            }
            month += 1;
        }

        accumulated / (months as f64 * DAYS_PER_MONTH)
    }

    /// Grows `balance` from `from` to `to` by the averaged daily rate.
    pub fn advance(&self, balance: f64, from: NaiveDateTime, to: NaiveDateTime) -> f64 {
        let minutes = minutes_between(from, to) as f64;
        balance + (balance / 100.0) * self.daily_rate(from, to) * minutes / MINUTES_PER_DAY
    }

    /// Advances `balance` to the payment date, then deducts the payment.
    pub fn apply_payment_and_advance(
        &self,
        balance: f64,
        from: NaiveDateTime,
        payment: &Payment,
    ) -> f64 {
        self.advance(balance, from, payment.date) - payment.total
    }
}
