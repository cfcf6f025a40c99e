//! Profitability metrics for one position.
//!
//! The annualized yield is an approximation of a money-weighted return, not
//! an IRR solve. Its denominator is not guarded: callers receive infinity or
//! NaN when the market value does not exceed the inflation-adjusted amount.

use chrono::NaiveDateTime;
use log::debug;

use crate::constants::DAYS_PER_YEAR;
use crate::errors::{Error, Result};
use crate::portfolio::income::PaymentAttributor;
use crate::portfolio::inflation::InflationAdjuster;
use crate::portfolio::position::PositionTracker;
use crate::utils::time_utils::{fractional_days_between, whole_days_between};

#[derive(Debug, Clone, Copy)]
pub struct YieldCalculator<'a> {
    tracker: PositionTracker<'a>,
    attributor: PaymentAttributor<'a>,
    adjuster: InflationAdjuster<'a>,
    current_price: f64,
    valuation_time: NaiveDateTime,
}

impl<'a> YieldCalculator<'a> {
    pub fn new(
        tracker: PositionTracker<'a>,
        attributor: PaymentAttributor<'a>,
        adjuster: InflationAdjuster<'a>,
        current_price: f64,
        valuation_time: NaiveDateTime,
    ) -> Self {
        Self {
            tracker,
            attributor,
            adjuster,
            current_price,
            valuation_time,
        }
    }

    fn no_trades(&self) -> Error {
        Error::NoTradesFound(self.tracker.ticker().to_string())
    }

    /// Net cash outflow weighted by the days it stayed invested.
    ///
    /// An open position keeps its last outflow invested until the valuation
    /// time; a closed one is averaged over first to last trade.
    pub fn average_invested_amount(&self) -> Result<f64> {
        let mut trades = self.tracker.trades();
        let first = trades.next().ok_or_else(|| self.no_trades())?;

        let mut outflow = first.net_outflow();
        let mut weighted = 0.0;
        let mut cursor = first.timestamp;
        for trade in trades {
            weighted += outflow * fractional_days_between(cursor, trade.timestamp);
            cursor = trade.timestamp;
            outflow += trade.net_outflow();
        }

        let average = if self.tracker.is_open(self.valuation_time) {
            weighted += outflow * fractional_days_between(cursor, self.valuation_time);
            weighted / fractional_days_between(first.timestamp, self.valuation_time)
        } else {
            weighted / fractional_days_between(first.timestamp, cursor)
        };
        debug!("Average invested amount for {}: {}", self.tracker.ticker(), average);
        Ok(average)
    }

    /// Unrecovered cost grown by inflation and reduced by dividends.
    ///
    /// Trades and payments are walked in date order; a payment dated at a
    /// trade's instant is settled after that trade.
    pub fn inflation_adjusted_amount(&self) -> Result<f64> {
        let payments = self.attributor.payments();
        let mut trades = self.tracker.trades();
        let first = trades.next().ok_or_else(|| self.no_trades())?;

        let mut balance = first.net_outflow();
        let mut cursor = first.timestamp;
        let mut next_payment = 0;

        for trade in trades {
            while next_payment < payments.len() && trade.timestamp > payments[next_payment].date {
                let payment = &payments[next_payment];
                balance = self
                    .adjuster
                    .apply_payment_and_advance(balance, cursor, payment);
                cursor = payment.date;
                next_payment += 1;
            }
            balance = self.adjuster.advance(balance, cursor, trade.timestamp);
            balance += trade.net_outflow();
            cursor = trade.timestamp;
        }

        for payment in &payments[next_payment..] {
            balance = self
                .adjuster
                .apply_payment_and_advance(balance, cursor, payment);
            cursor = payment.date;
        }

        if self.tracker.is_open(self.valuation_time) {
            balance = self.adjuster.advance(balance, cursor, self.valuation_time);
        }

        debug!(
            "Inflation-adjusted amount for {}: {} ({} payments)",
            self.tracker.ticker(),
            balance,
            payments.len()
        );
        Ok(balance)
    }

    /// Market value of the current share balance; zero for a closed position.
    pub fn current_market_value(&self) -> f64 {
        let shares = self.tracker.shares_balance(self.valuation_time);
        if shares > 0 {
            shares as f64 * self.current_price
        } else {
            0.0
        }
    }

    /// Years from the first trade to the valuation time (open position) or
    /// to the last trade (closed position), counted in whole days.
    pub fn years_elapsed(&self) -> Result<f64> {
        let first = self.tracker.first_trade_date()?;
        let end = if self.tracker.is_open(self.valuation_time) {
            self.valuation_time
        } else {
            self.tracker.last_trade_date()?
        };
        Ok(whole_days_between(first, end) as f64 / DAYS_PER_YEAR)
    }

    /// Annualized yield, percent. May be infinite or NaN.
    pub fn annual_percentage_yield(&self) -> Result<f64> {
        let average = self.average_invested_amount()?;
        let gain = self.current_market_value() - self.inflation_adjusted_amount()?;
        let years = self.years_elapsed()?;
        Ok(100.0 / (average / gain) / years)
    }

    /// Inflation-adjusted cost per share held; zero for a closed position.
    pub fn average_share_price(&self) -> Result<f64> {
        let shares = self.tracker.shares_balance(self.valuation_time);
        if shares > 0 {
            Ok(self.inflation_adjusted_amount()? / shares as f64)
        } else {
            Ok(0.0)
        }
    }
}
