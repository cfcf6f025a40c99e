//! Divfolio Market Data Crate
//!
//! Loads everything the accountant needs before it is constructed:
//! - the broker trade report, as a workbook or CSV ([`ledger_import`])
//! - the dividend history, from a file or the analytics page ([`dividends`])
//! - the monthly inflation table ([`inflation`])
//!
//! Loading is eager and fail-fast. There is no retry or caching layer.

pub mod client;
pub mod dividends;
pub mod errors;
pub mod inflation;
pub mod ledger_import;
mod parsing;
pub mod spreadsheet;

pub use client::PageClient;
pub use dividends::{
    dividends_from_rows, fetch_dividends, parse_dividend_csv, parse_dividend_page,
    read_dividend_file,
};
pub use errors::{MarketDataError, Result};
pub use inflation::{fetch_inflation, parse_inflation_page, read_inflation_file};
pub use ledger_import::{ledger_from_rows, parse_ledger, read_ledger};
