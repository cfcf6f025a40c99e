//! Trade ledger domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Broker label for a purchase in the localized trade report.
pub const LOCALIZED_BUY_LABEL: &str = "Купля";
/// Broker label for a sale in the localized trade report.
pub const LOCALIZED_SELL_LABEL: &str = "Продажа";

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "BUY",
            TradeDirection::Sell => "SELL",
        }
    }

    /// +1 for purchases, -1 for sales.
    pub fn sign(&self) -> f64 {
        match self {
            TradeDirection::Buy => 1.0,
            TradeDirection::Sell => -1.0,
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == LOCALIZED_BUY_LABEL || trimmed.eq_ignore_ascii_case("BUY") {
            Ok(TradeDirection::Buy)
        } else if trimmed == LOCALIZED_SELL_LABEL || trimmed.eq_ignore_ascii_case("SELL") {
            Ok(TradeDirection::Sell)
        } else {
            Err(ValidationError::InvalidInput(format!(
                "Unknown trade direction '{}'",
                trimmed
            )))
        }
    }
}

/// A single executed trade as reported by the broker.
///
/// `quantity` is expressed in broker lots, not in shares; the lot size is
/// implied by `volume / (unit_price * quantity)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub timestamp: NaiveDateTime,
    pub ticker: String,
    pub direction: TradeDirection,
    pub quantity: f64,
    pub unit_price: f64,
    /// Traded amount, always non-negative.
    pub volume: f64,
    pub broker_fee: f64,
    pub system_fee: f64,
}

impl TradeRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        ticker: impl Into<String>,
        direction: TradeDirection,
        quantity: f64,
        unit_price: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            ticker: ticker.into(),
            direction,
            quantity,
            unit_price,
            volume,
            broker_fee: 0.0,
            system_fee: 0.0,
        }
    }

    pub fn with_fees(mut self, broker_fee: f64, system_fee: f64) -> Self {
        self.broker_fee = broker_fee;
        self.system_fee = system_fee;
        self
    }

    /// Lot count signed by direction (+buy, -sell).
    pub fn signed_quantity(&self) -> f64 {
        self.direction.sign() * self.quantity
    }

    /// Cash paid by the investor for this trade, fees excluded (+buy, -sell).
    pub fn signed_volume(&self) -> f64 {
        self.direction.sign() * self.volume
    }

    pub fn fees(&self) -> f64 {
        self.broker_fee + self.system_fee
    }

    /// Net cash outflow including fees. Fees are always a cost.
    pub fn net_outflow(&self) -> f64 {
        self.signed_volume() + self.fees()
    }

    /// Underlying shares per traded lot implied by the reported volume.
    pub fn implied_lot(&self) -> f64 {
        (self.volume / self.unit_price / self.quantity).round()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ticker.trim().is_empty() {
            return Err(ValidationError::MissingField("ticker".to_string()));
        }
        for (name, value) in [
            ("quantity", self.quantity),
            ("unitPrice", self.unit_price),
            ("volume", self.volume),
            ("brokerFee", self.broker_fee),
            ("systemFee", self.system_fee),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidInput(format!(
                    "Trade on {} has invalid {}: {}",
                    self.timestamp, name, value
                )));
            }
        }
        if self.quantity == 0.0 {
            return Err(ValidationError::InvalidInput(format!(
                "Trade on {} has zero quantity",
                self.timestamp
            )));
        }
        Ok(())
    }
}
