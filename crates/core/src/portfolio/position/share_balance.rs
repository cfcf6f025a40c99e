use crate::corporate_actions::LotAdjustment;
use crate::ledger::TradeRecord;

/// Running share count folded over trades and ex-dividend dates.
///
/// Shares are whole numbers; each accumulation step truncates toward zero.
/// The split divisor from a post-split [`LotAdjustment`] is applied to the
/// accumulated count the first time one is observed and ignored afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShareBalance {
    shares: i64,
    split_applied: bool,
}

impl ShareBalance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shares(&self) -> i64 {
        self.shares
    }

    pub fn split_applied(&self) -> bool {
        self.split_applied
    }

    /// Crosses the split boundary if `adjustment` is the first post-split one.
    pub fn observe(&mut self, adjustment: &LotAdjustment) {
        if adjustment.post_split && !self.split_applied {
            self.shares = (self.shares as f64 / adjustment.split_ratio_divisor) as i64;
            self.split_applied = true;
        }
    }

    /// Adds the trade's signed lot count converted to shares.
    pub fn apply_trade(&mut self, trade: &TradeRecord, adjustment: &LotAdjustment) {
        self.observe(adjustment);
        let delta = trade.signed_quantity() * adjustment.lot_multiplier as f64;
        self.shares = (self.shares as f64 + delta) as i64;
    }
}
