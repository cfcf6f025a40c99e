use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// One declared dividend keyed by its ex-dividend date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendEvent {
    pub ex_dividend_date: NaiveDateTime,
    pub dividend_per_share: f64,
}

impl DividendEvent {
    pub fn new(ex_dividend_date: NaiveDateTime, dividend_per_share: f64) -> Self {
        Self {
            ex_dividend_date,
            dividend_per_share,
        }
    }
}

/// Dividend history of one stock, ascending by ex-dividend date.
///
/// Dates need not be unique; equal dates keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendSeries {
    events: Vec<DividendEvent>,
}

impl DividendSeries {
    pub fn new(mut events: Vec<DividendEvent>) -> Self {
        events.sort_by_key(|event| event.ex_dividend_date);
        DividendSeries { events }
    }

    /// Zips two parallel columns; extra entries in the longer one are ignored.
    pub fn from_pairs(dates: &[NaiveDateTime], dividends: &[f64]) -> Self {
        let events = dates
            .iter()
            .zip(dividends)
            .map(|(date, dividend)| DividendEvent::new(*date, *dividend))
            .collect();
        Self::new(events)
    }

    pub fn events(&self) -> &[DividendEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rejects dividends that are not finite numbers.
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self
            .events
            .iter()
            .find(|event| !event.dividend_per_share.is_finite())
        {
            return Err(ValidationError::InvalidInput(format!(
                "Dividend on {} is not a finite amount: {}",
                bad.ex_dividend_date.format("%Y-%m-%d"),
                bad.dividend_per_share
            ))
            .into());
        }
        Ok(())
    }
}
