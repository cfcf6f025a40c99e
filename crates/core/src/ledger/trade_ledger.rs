use log::debug;
use serde::{Deserialize, Serialize};

use super::ledger_model::TradeRecord;
use crate::errors::Result;

/// Read-only, ordered sequence of broker trades.
///
/// Records are kept in the order the broker reported them. The engine
/// assumes ascending timestamps and never reorders; duplicates are legal and
/// each one counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeLedger {
    records: Vec<TradeRecord>,
}

impl TradeLedger {
    pub fn new(records: Vec<TradeRecord>) -> Self {
        debug!("Trade ledger built with {} records", records.len());
        TradeLedger { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Trades of `ticker` in ledger order. The broker spells tickers in upper
    /// case, so the requested ticker is upper-cased before comparison.
    pub fn trades_for<'a>(&'a self, ticker: &str) -> impl Iterator<Item = &'a TradeRecord> + 'a {
        let wanted = ticker.trim().to_uppercase();
        self.records
            .iter()
            .filter(move |record| record.ticker == wanted)
    }

    /// Validates the trades of `ticker` only. Rows of other instruments in
    /// the same report are never read by the engine.
    pub fn validate_trades_for(&self, ticker: &str) -> Result<()> {
        for record in self.trades_for(ticker) {
            record.validate()?;
        }
        Ok(())
    }

    /// Tickers present in the ledger, in first-seen order.
    pub fn tickers(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.ticker) {
                seen.push(record.ticker.clone());
            }
        }
        seen
    }
}
