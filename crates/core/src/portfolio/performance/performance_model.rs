use chrono::NaiveDateTime;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::portfolio::income::Payment;

/// Rounds an engine value for display. Non-finite values have no decimal form.
pub fn to_display_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(DISPLAY_DECIMAL_PRECISION))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub date: NaiveDateTime,
    pub shares_quantity: i64,
    pub dividend_per_share: Decimal,
    pub tax_percent: Decimal,
    pub total: Decimal,
}

impl From<&Payment> for PaymentSummary {
    fn from(payment: &Payment) -> Self {
        Self {
            date: payment.date,
            shares_quantity: payment.shares_quantity,
            dividend_per_share: Decimal::from_f64(payment.dividend_per_share).unwrap_or_default(),
            tax_percent: Decimal::from_f64(payment.tax_percent).unwrap_or_default(),
            total: to_display_decimal(payment.total).unwrap_or_default(),
        }
    }
}

/// Every figure the engine reports for one position, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub ticker: String,
    pub payments: Vec<PaymentSummary>,
    pub payments_total: Decimal,
    pub profit: Decimal,
    /// Undefined when first and last trade share the same instant.
    pub average_amount: Option<Decimal>,
    pub inflation_adjusted_amount: Option<Decimal>,
    pub shares_balance: i64,
    pub first_trade_date: NaiveDateTime,
    pub last_trade_date: NaiveDateTime,
    /// Percent per year. `None` when the raw yield is infinite or NaN.
    pub annual_percentage_yield: Option<Decimal>,
    pub average_share_price: Option<Decimal>,
}
