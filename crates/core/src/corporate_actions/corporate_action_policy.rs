//! Corporate action policy for share counting.
//!
//! Broker ledgers report quantities in lots and never restate history after a
//! split. The policy tells the share-balance fold which lot size to use for a
//! trade and which divisor to apply to shares accumulated before the split.
//!
//! The divisor is consumed once, by the first event at or after the split
//! date, and is treated as 1 from then on. See [`ShareBalance`].
//!
//! [`ShareBalance`]: crate::portfolio::position::ShareBalance

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::split_model::SplitEvent;

/// Lot multiplier and split divisor effective at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotAdjustment {
    pub lot_multiplier: i64,
    pub split_ratio_divisor: f64,
    pub post_split: bool,
}

impl LotAdjustment {
    pub fn unadjusted(lot_multiplier: i64) -> Self {
        Self {
            lot_multiplier,
            split_ratio_divisor: 1.0,
            post_split: false,
        }
    }
}

/// Split handling for a single stock. At most one split is configured.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorporateActionPolicy {
    split: Option<SplitEvent>,
}

impl CorporateActionPolicy {
    pub fn new(split: Option<SplitEvent>) -> Self {
        CorporateActionPolicy { split }
    }

    pub fn none() -> Self {
        CorporateActionPolicy { split: None }
    }

    pub fn split(&self) -> Option<&SplitEvent> {
        self.split.as_ref()
    }

    /// Adjustment for an event at `timestamp`.
    ///
    /// Strictly before the split date (or with no split configured) the
    /// ledger-implied `initial_lot` applies with divisor 1. At or after the
    /// split date the post-split lot applies together with the split ratio,
    /// which the caller divides into the pre-split balance once.
    pub fn adjustment_at(&self, timestamp: NaiveDateTime, initial_lot: i64) -> LotAdjustment {
        match &self.split {
            Some(split) if split.is_effective_at(timestamp) => LotAdjustment {
                lot_multiplier: split.new_lot_size,
                split_ratio_divisor: split.ratio,
                post_split: true,
            },
            _ => LotAdjustment::unadjusted(initial_lot),
        }
    }
}
