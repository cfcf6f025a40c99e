use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use divfolio_core::constants::DEFAULT_TAX_PERCENT;
use divfolio_core::corporate_actions::SplitEvent;
use divfolio_core::utils::time_utils::start_of_day;
use divfolio_core::StockConfig;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ledger_path: PathBuf,
    pub ticker: String,
    pub price: f64,
    pub tax_percent: f64,
    /// Dividend CSV or workbook; the dividend page is fetched when absent.
    pub dividends_path: Option<PathBuf>,
    pub extra_inflation: Option<f64>,
    pub split: Option<SplitEvent>,
    /// Saved inflation page; the live page is fetched when absent.
    pub inflation_path: Option<PathBuf>,
    pub output: OutputFormat,
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> anyhow::Result<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow!("{} is not set", name))
}

fn optional<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name).map(|value| value.trim().to_string()) {
        Some(value) if !value.is_empty() => value
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Invalid {}: '{}'", name, value)),
        _ => Ok(None),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let ledger_path = PathBuf::from(required(&lookup, "DIVFOLIO_LEDGER")?);
        let ticker = required(&lookup, "DIVFOLIO_TICKER")?;
        let price = optional::<f64>(&lookup, "DIVFOLIO_PRICE")?
            .ok_or_else(|| anyhow!("DIVFOLIO_PRICE is not set"))?;
        let tax_percent = optional(&lookup, "DIVFOLIO_TAX")?.unwrap_or(DEFAULT_TAX_PERCENT);

        let split = match optional::<NaiveDate>(&lookup, "DIVFOLIO_SPLIT_DATE")? {
            Some(date) => {
                let ratio = optional(&lookup, "DIVFOLIO_SPLIT_RATIO")?.unwrap_or(1.0);
                let lot = optional::<i64>(&lookup, "DIVFOLIO_LOT_AFTER_SPLIT")?.ok_or_else(|| {
                    anyhow!("DIVFOLIO_LOT_AFTER_SPLIT is required with DIVFOLIO_SPLIT_DATE")
                })?;
                Some(SplitEvent::new(start_of_day(date), ratio, lot))
            }
            None => None,
        };

        let output = match lookup("DIVFOLIO_OUTPUT") {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };

        Ok(Self {
            ledger_path,
            ticker,
            price,
            tax_percent,
            dividends_path: optional::<String>(&lookup, "DIVFOLIO_DIVIDENDS")?.map(PathBuf::from),
            extra_inflation: optional(&lookup, "DIVFOLIO_EXTRA_INFLATION")?,
            split,
            inflation_path: optional::<String>(&lookup, "DIVFOLIO_INFLATION_FILE")?
                .map(PathBuf::from),
            output,
        })
    }

    pub fn stock_config(&self) -> StockConfig {
        StockConfig {
            ticker: self.ticker.clone(),
            price: self.price,
            tax_percent: self.tax_percent,
            split: self.split,
            extra_inflation: self.extra_inflation,
        }
    }
}
