use chrono::NaiveDateTime;
use log::debug;
use rust_decimal::Decimal;

use super::accountant_model::StockConfig;
use super::accountant_traits::AccountantServiceTrait;
use crate::corporate_actions::CorporateActionPolicy;
use crate::errors::Result;
use crate::ledger::TradeLedger;
use crate::market_data::{DividendSeries, InflationTable};
use crate::portfolio::income::{Payment, PaymentAttributor};
use crate::portfolio::inflation::InflationAdjuster;
use crate::portfolio::performance::{
    to_display_decimal, PaymentSummary, PositionSummary, YieldCalculator,
};
use crate::portfolio::position::PositionTracker;
use crate::utils::time_utils::local_now;

/// Dividend and yield accounting for one ticker over an immutable ledger.
///
/// Inputs are loaded by the caller before construction and never change
/// afterwards. "Now" is fixed at construction, so repeated queries agree.
#[derive(Debug, Clone)]
pub struct DividendAccountant {
    ledger: TradeLedger,
    dividends: DividendSeries,
    inflation: InflationTable,
    config: StockConfig,
    ticker: String,
    policy: CorporateActionPolicy,
    valuation_time: NaiveDateTime,
}

impl DividendAccountant {
    pub fn new(
        ledger: TradeLedger,
        dividends: DividendSeries,
        inflation: InflationTable,
        config: StockConfig,
    ) -> Result<Self> {
        config.validate()?;
        let ticker = config.normalized_ticker();
        ledger.validate_trades_for(&ticker)?;
        dividends.validate()?;
        inflation.validate()?;

        let inflation = match config.extra_inflation {
            Some(rate) => inflation.with_extra_estimate(rate),
            None => inflation,
        };
        let policy = CorporateActionPolicy::new(config.split);

        debug!(
            "Created accountant for {}: {} ledger rows, {} ex-dividend dates, {} inflation years",
            ticker,
            ledger.len(),
            dividends.len(),
            inflation.years_desc().count()
        );

        Ok(Self {
            ledger,
            dividends,
            inflation,
            config,
            ticker,
            policy,
            valuation_time: local_now(),
        })
    }

    /// Pins "now" for every query, replacing the wall clock.
    pub fn with_valuation_time(mut self, valuation_time: NaiveDateTime) -> Self {
        self.valuation_time = valuation_time;
        self
    }

    pub fn valuation_time(&self) -> NaiveDateTime {
        self.valuation_time
    }

    pub fn config(&self) -> &StockConfig {
        &self.config
    }

    pub fn inflation(&self) -> &InflationTable {
        &self.inflation
    }

    fn tracker(&self) -> PositionTracker<'_> {
        PositionTracker::new(&self.ledger, &self.ticker, &self.policy)
    }

    fn attributor(&self) -> PaymentAttributor<'_> {
        PaymentAttributor::new(self.tracker(), &self.dividends, self.config.tax_percent)
    }

    fn calculator(&self) -> YieldCalculator<'_> {
        YieldCalculator::new(
            self.tracker(),
            self.attributor(),
            InflationAdjuster::new(&self.inflation),
            self.config.price,
            self.valuation_time,
        )
    }
}

impl AccountantServiceTrait for DividendAccountant {
    fn get_payments(&self) -> Vec<Payment> {
        self.attributor().payments()
    }

    fn get_payments_total(&self) -> f64 {
        self.attributor().payments_total()
    }

    fn get_profit(&self) -> f64 {
        self.tracker().profit()
    }

    fn get_average_amount(&self) -> Result<f64> {
        self.calculator().average_invested_amount()
    }

    fn get_inflation_adjusted_amount(&self) -> Result<f64> {
        self.calculator().inflation_adjusted_amount()
    }

    fn get_shares_balance(&self) -> i64 {
        self.tracker().shares_balance(self.valuation_time)
    }

    fn get_first_trade_date(&self) -> Result<NaiveDateTime> {
        self.tracker().first_trade_date()
    }

    fn get_last_trade_date(&self) -> Result<NaiveDateTime> {
        self.tracker().last_trade_date()
    }

    fn get_annual_percentage_yield(&self) -> Result<f64> {
        self.calculator().annual_percentage_yield()
    }

    fn get_average_share_price(&self) -> Result<f64> {
        self.calculator().average_share_price()
    }

    fn get_summary(&self) -> Result<PositionSummary> {
        debug!("Building summary for {} at {}", self.ticker, self.valuation_time);

        let payments = self.get_payments();
        let payments_total: f64 = payments.iter().map(|payment| payment.total).sum();
        let calculator = self.calculator();

        Ok(PositionSummary {
            ticker: self.ticker.clone(),
            payments: payments.iter().map(PaymentSummary::from).collect(),
            payments_total: to_display_decimal(payments_total).unwrap_or(Decimal::ZERO),
            profit: to_display_decimal(self.get_profit()).unwrap_or(Decimal::ZERO),
            average_amount: to_display_decimal(calculator.average_invested_amount()?),
            inflation_adjusted_amount: to_display_decimal(calculator.inflation_adjusted_amount()?),
            shares_balance: self.get_shares_balance(),
            first_trade_date: self.get_first_trade_date()?,
            last_trade_date: self.get_last_trade_date()?,
            annual_percentage_yield: to_display_decimal(calculator.annual_percentage_yield()?),
            average_share_price: to_display_decimal(calculator.average_share_price()?),
        })
    }
}
