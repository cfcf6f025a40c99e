use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TAX_PERCENT;
use crate::corporate_actions::SplitEvent;
use crate::errors::{Error, Result};

/// The instrument under analysis and the market facts the ledger lacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockConfig {
    pub ticker: String,
    /// Current market price per share.
    pub price: f64,
    #[serde(default = "default_tax_percent")]
    pub tax_percent: f64,
    #[serde(default)]
    pub split: Option<SplitEvent>,
    /// Monthly inflation estimate for the month after the last published one.
    #[serde(default)]
    pub extra_inflation: Option<f64>,
}

fn default_tax_percent() -> f64 {
    DEFAULT_TAX_PERCENT
}

impl StockConfig {
    pub fn new(ticker: impl Into<String>, price: f64) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            tax_percent: DEFAULT_TAX_PERCENT,
            split: None,
            extra_inflation: None,
        }
    }

    pub fn with_tax_percent(mut self, tax_percent: f64) -> Self {
        self.tax_percent = tax_percent;
        self
    }

    pub fn with_split(mut self, split: SplitEvent) -> Self {
        self.split = Some(split);
        self
    }

    pub fn with_extra_inflation(mut self, rate: f64) -> Self {
        self.extra_inflation = Some(rate);
        self
    }

    /// Ticker as spelled in the broker export.
    pub fn normalized_ticker(&self) -> String {
        self.ticker.trim().to_uppercase()
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            return Err(Error::InvalidConfigValue("Ticker cannot be empty".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::InvalidConfigValue(format!(
                "Invalid price for {}: {}",
                self.ticker, self.price
            )));
        }
        if !(0.0..=100.0).contains(&self.tax_percent) {
            return Err(Error::InvalidConfigValue(format!(
                "Tax percent must be within 0..=100, got {}",
                self.tax_percent
            )));
        }
        if let Some(rate) = self.extra_inflation {
            if !rate.is_finite() {
                return Err(Error::InvalidConfigValue(format!(
                    "Invalid extra inflation estimate: {}",
                    rate
                )));
            }
        }
        if let Some(split) = &self.split {
            split.validate()?;
        }
        Ok(())
    }
}
