//! Market data module - dividend history and inflation time series.

mod dividend_model;
mod inflation_model;

#[cfg(test)]
mod inflation_model_tests;

pub use dividend_model::{DividendEvent, DividendSeries};
pub use inflation_model::InflationTable;
