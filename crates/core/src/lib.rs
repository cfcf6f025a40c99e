//! Divfolio Core - dividend, inflation and yield accounting for one position.
//!
//! The crate is I/O free. Ledgers, dividend histories and inflation tables are
//! loaded by the `market-data` crate and handed over fully built.

pub mod accountant;
pub mod constants;
pub mod corporate_actions;
pub mod errors;
pub mod ledger;
pub mod market_data;
pub mod portfolio;
pub mod utils;

pub use accountant::{AccountantServiceTrait, DividendAccountant, StockConfig};
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
