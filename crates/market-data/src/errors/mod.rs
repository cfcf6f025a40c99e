//! Error types for the market data crate.
//!
//! Every variant is fatal for the caller: data sources are loaded once,
//! before the accountant is built, and are never retried.

use thiserror::Error;

/// Result alias for market data operations.
pub type Result<T> = std::result::Result<T, MarketDataError>;

/// Errors that can occur while loading ledgers, dividends or inflation data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A network error occurred while fetching a page.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CSV reader could not decode a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A workbook could not be opened or decoded.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// A local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A cell was present but could not be interpreted.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Row and column, or the page the value came from
        location: String,
        /// What went wrong
        message: String,
    },

    /// The source was readable but held nothing usable.
    #[error("No data: {0}")]
    NoData(String),

    /// The parsed data violates a domain rule.
    #[error(transparent)]
    Core(#[from] divfolio_core::Error),
}

impl MarketDataError {
    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        MarketDataError::Parse {
            location: location.into(),
            message: message.into(),
        }
    }
}
