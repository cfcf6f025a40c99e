//! Performance module - average invested amount, inflation-adjusted cost and yield.

mod performance_model;
mod yield_calculator;


pub use performance_model::{to_display_decimal, PaymentSummary, PositionSummary};
pub use yield_calculator::YieldCalculator;
