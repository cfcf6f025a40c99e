//! Inflation module - compounding invested cash by monthly inflation.

mod inflation_adjuster;

#[cfg(test)]
mod inflation_adjuster_tests;

pub use inflation_adjuster::InflationAdjuster;
