use chrono::NaiveDateTime;
use log::{debug, warn};

use super::share_balance::ShareBalance;
use crate::corporate_actions::{CorporateActionPolicy, LotAdjustment};
use crate::errors::{Error, Result};
use crate::ledger::{TradeLedger, TradeRecord};

/// Replays the trades of one ticker to derive share balances and cash flows.
///
/// Holds only borrowed, immutable inputs; every query folds the ledger from
/// the start.
#[derive(Debug, Clone, Copy)]
pub struct PositionTracker<'a> {
    ledger: &'a TradeLedger,
    ticker: &'a str,
    policy: &'a CorporateActionPolicy,
}

impl<'a> PositionTracker<'a> {
    pub fn new(ledger: &'a TradeLedger, ticker: &'a str, policy: &'a CorporateActionPolicy) -> Self {
        Self {
            ledger,
            ticker,
            policy,
        }
    }

    pub fn ticker(&self) -> &str {
        self.ticker
    }

    pub fn policy(&self) -> &CorporateActionPolicy {
        self.policy
    }

    /// Matching trades in ledger order.
    pub fn trades(&self) -> impl Iterator<Item = &'a TradeRecord> + 'a {
        self.ledger.trades_for(self.ticker)
    }

    fn first_trade(&self) -> Result<&'a TradeRecord> {
        self.trades()
            .next()
            .ok_or_else(|| Error::NoTradesFound(self.ticker.to_string()))
    }

    /// Shares per lot implied by the first matching trade.
    ///
    /// Falls back to 1 when the ticker was never traded or the first trade
    /// does not yield a usable ratio.
    pub fn initial_lot(&self) -> i64 {
        let Some(first) = self.trades().next() else {
            return 1;
        };
        let lot = first.implied_lot();
        if lot.is_finite() && lot >= 1.0 {
            lot as i64
        } else {
            warn!(
                "Cannot derive lot size for {} from trade on {} (volume {}, price {}, quantity {}). Using 1.",
                self.ticker, first.timestamp, first.volume, first.unit_price, first.quantity
            );
            1
        }
    }

    /// Lot adjustment effective at `timestamp`.
    pub fn adjustment_at(&self, timestamp: NaiveDateTime, initial_lot: i64) -> LotAdjustment {
        self.policy.adjustment_at(timestamp, initial_lot)
    }

    pub fn first_trade_date(&self) -> Result<NaiveDateTime> {
        self.first_trade().map(|trade| trade.timestamp)
    }

    pub fn last_trade_date(&self) -> Result<NaiveDateTime> {
        self.trades()
            .last()
            .map(|trade| trade.timestamp)
            .ok_or_else(|| Error::NoTradesFound(self.ticker.to_string()))
    }

    /// Share balance after the first `upto_index` matching trades.
    pub fn running_balance_at(&self, upto_index: usize) -> ShareBalance {
        let lot = self.initial_lot();
        self.trades()
            .take(upto_index)
            .fold(ShareBalance::new(), |mut balance, trade| {
                balance.apply_trade(trade, &self.adjustment_at(trade.timestamp, lot));
                balance
            })
    }

    /// Current share balance as seen at `valuation_time`.
    ///
    /// A split dated on or before `valuation_time` is applied even when no
    /// trade followed it.
    pub fn shares_balance(&self, valuation_time: NaiveDateTime) -> i64 {
        let lot = self.initial_lot();
        let mut balance = self.running_balance_at(usize::MAX);
        balance.observe(&self.adjustment_at(valuation_time, lot));
        debug!("Shares balance for {}: {}", self.ticker, balance.shares());
        balance.shares()
    }

    pub fn is_open(&self, valuation_time: NaiveDateTime) -> bool {
        self.shares_balance(valuation_time) > 0
    }

    /// Total cash paid into the position: buys minus sells plus all fees.
    pub fn net_cash_outflow(&self) -> f64 {
        self.trades().map(TradeRecord::net_outflow).sum()
    }

    /// Cash received minus cash paid. Positive means net cash received.
    pub fn profit(&self) -> f64 {
        -self.net_cash_outflow()
    }
}
