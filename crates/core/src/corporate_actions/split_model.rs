use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A stock split effective from `effective_date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitEvent {
    pub effective_date: NaiveDateTime,
    /// Pre-split shares per post-split share.
    pub ratio: f64,
    /// Shares per broker lot from the split on.
    pub new_lot_size: i64,
}

impl SplitEvent {
    pub fn new(effective_date: NaiveDateTime, ratio: f64, new_lot_size: i64) -> Self {
        Self {
            effective_date,
            ratio,
            new_lot_size,
        }
    }

    pub fn is_effective_at(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.effective_date
    }

    pub fn validate(&self) -> Result<()> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(Error::InvalidConfigValue(format!(
                "Split ratio must be positive, got {}",
                self.ratio
            )));
        }
        if self.new_lot_size <= 0 {
            return Err(Error::InvalidConfigValue(format!(
                "Lot size after split must be positive, got {}",
                self.new_lot_size
            )));
        }
        Ok(())
    }
}
