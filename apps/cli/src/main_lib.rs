use divfolio_core::ledger::TradeLedger;
use divfolio_core::market_data::{DividendSeries, InflationTable};
use divfolio_core::{AccountantServiceTrait, DividendAccountant};
use divfolio_market_data::{
    fetch_dividends, fetch_inflation, read_dividend_file, read_inflation_file, read_ledger,
    PageClient,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, OutputFormat};
use crate::report::render_text;

pub fn init_tracing() {
    let log_format = std::env::var("DIVFOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Loads every input eagerly. Any failure aborts before the accountant exists.
pub async fn build_accountant(config: &Config) -> anyhow::Result<DividendAccountant> {
    let ledger: TradeLedger = read_ledger(&config.ledger_path)?;
    tracing::info!(
        "Ledger {} holds {} trades",
        config.ledger_path.display(),
        ledger.len()
    );

    let client = PageClient::new()?;

    let dividends: DividendSeries = match &config.dividends_path {
        Some(path) => read_dividend_file(path)?,
        None => fetch_dividends(&client, &config.ticker).await?,
    };

    let inflation: InflationTable = match &config.inflation_path {
        Some(path) => read_inflation_file(path)?,
        None => fetch_inflation(&client).await?,
    };

    Ok(DividendAccountant::new(
        ledger,
        dividends,
        inflation,
        config.stock_config(),
    )?)
}

/// Builds the accountant and renders its summary in the configured format.
pub async fn run(config: &Config) -> anyhow::Result<String> {
    let accountant = build_accountant(config).await?;
    let summary = accountant.get_summary()?;
    tracing::info!(
        "{}: {} payments, balance {} shares",
        summary.ticker,
        summary.payments.len(),
        summary.shares_balance
    );

    Ok(match config.output {
        OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
        OutputFormat::Text => render_text(&summary),
    })
}
