use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::portfolio::income::Payment;
use crate::portfolio::performance::PositionSummary;

/// Query surface of the dividend accountant.
///
/// Every query is a pure function of the inputs captured at construction.
/// Queries that need a first or last trade fail with `NoTradesFound` when
/// the ticker was never traded.
pub trait AccountantServiceTrait: Send + Sync {
    fn get_payments(&self) -> Vec<Payment>;
    fn get_payments_total(&self) -> f64;
    fn get_profit(&self) -> f64;
    fn get_average_amount(&self) -> Result<f64>;
    fn get_inflation_adjusted_amount(&self) -> Result<f64>;
    fn get_shares_balance(&self) -> i64;
    fn get_first_trade_date(&self) -> Result<NaiveDateTime>;
    fn get_last_trade_date(&self) -> Result<NaiveDateTime>;
    /// Percent per year. Not guarded against a non-positive denominator.
    fn get_annual_percentage_yield(&self) -> Result<f64>;
    fn get_average_share_price(&self) -> Result<f64>;
    fn get_summary(&self) -> Result<PositionSummary>;
}
