use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A dividend payment attributed to the position on one ex-dividend date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub date: NaiveDateTime,
    pub shares_quantity: i64,
    pub dividend_per_share: f64,
    pub tax_percent: f64,
    /// Net of tax.
    pub total: f64,
}

impl Payment {
    pub fn new(
        date: NaiveDateTime,
        shares_quantity: i64,
        dividend_per_share: f64,
        tax_percent: f64,
    ) -> Self {
        let gross = shares_quantity as f64 * dividend_per_share;
        Self {
            date,
            shares_quantity,
            dividend_per_share,
            tax_percent,
            total: gross - gross / 100.0 * tax_percent,
        }
    }

    pub fn gross(&self) -> f64 {
        self.shares_quantity as f64 * self.dividend_per_share
    }

    pub fn tax(&self) -> f64 {
        self.gross() - self.total
    }

    pub fn is_empty(&self) -> bool {
        self.shares_quantity == 0
    }
}
