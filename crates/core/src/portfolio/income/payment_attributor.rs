use log::debug;

use super::payment_model::Payment;
use crate::market_data::{DividendEvent, DividendSeries};
use crate::portfolio::position::{PositionTracker, ShareBalance};

/// Attributes each ex-dividend date to the share balance held on that date.
///
/// A single forward pass merges the trade timeline with the ascending
/// dividend series. An ex-dividend date is settled by the first trade that
/// happens strictly after it, using the balance accumulated before that
/// trade; dates after the last trade use the final balance.
#[derive(Debug, Clone, Copy)]
pub struct PaymentAttributor<'a> {
    tracker: PositionTracker<'a>,
    dividends: &'a DividendSeries,
    tax_percent: f64,
}

impl<'a> PaymentAttributor<'a> {
    pub fn new(tracker: PositionTracker<'a>, dividends: &'a DividendSeries, tax_percent: f64) -> Self {
        Self {
            tracker,
            dividends,
            tax_percent,
        }
    }

    fn emit(&self, event: &DividendEvent, balance: &mut ShareBalance, lot: i64) -> Payment {
        balance.observe(&self.tracker.adjustment_at(event.ex_dividend_date, lot));
        Payment::new(
            event.ex_dividend_date,
            balance.shares(),
            event.dividend_per_share,
            self.tax_percent,
        )
    }

    /// Payments with a non-zero share quantity, ascending by date.
    pub fn payments(&self) -> Vec<Payment> {
        let events = self.dividends.events();
        if events.is_empty() {
            return Vec::new();
        }

        let lot = self.tracker.initial_lot();
        let mut balance = ShareBalance::new();
        let mut pointer = 0;
        let mut payments = Vec::with_capacity(events.len());

        for trade in self.tracker.trades() {
            if pointer == events.len() {
                break;
            }
            while pointer < events.len() && trade.timestamp > events[pointer].ex_dividend_date {
                payments.push(self.emit(&events[pointer], &mut balance, lot));
                pointer += 1;
            }
            balance.apply_trade(trade, &self.tracker.adjustment_at(trade.timestamp, lot));
        }

        for event in &events[pointer..] {
            payments.push(self.emit(event, &mut balance, lot));
        }

        let emitted = payments.len();
        payments.retain(|payment| !payment.is_empty());
        debug!(
            "Attributed {} of {} ex-dividend dates to {}",
            payments.len(),
            emitted,
            self.tracker.ticker()
        );
        payments
    }

    /// Sum of net payment totals.
    pub fn payments_total(&self) -> f64 {
        self.payments().iter().map(|payment| payment.total).sum()
    }
}
