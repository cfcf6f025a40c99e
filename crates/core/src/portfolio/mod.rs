//! Portfolio module - share balances, dividend income, inflation and yield.

pub mod income;
pub mod inflation;
pub mod performance;
pub mod position;
