//! Dividend history sources: a two-column file (CSV or workbook) or the
//! analytics page.

use chrono::{NaiveDate, NaiveDateTime};
use divfolio_core::market_data::{DividendEvent, DividendSeries};
use divfolio_core::utils::time_utils::start_of_day;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use std::path::Path;

use crate::client::PageClient;
use crate::errors::Result;
use crate::parsing::{parse_datetime, parse_number, read_csv_rows};
use crate::spreadsheet::{is_spreadsheet, read_first_sheet};

/// Base URL of the dividend analytics page; the lower-case ticker is appended.
pub const DIVIDEND_PAGE_URL: &str = "https://www.dohod.ru/ik/analytics/dividend/";

lazy_static! {
    /// Ex-dividend date cell, followed by the fiscal year cell and the
    /// dividend cell.
    static ref DIVIDEND_ROW_REGEX: Regex = Regex::new(
        r"(\d+\.\d+\.\d+)</td>\s{0,20}<td>\d{4}</td>\s{0,20}<td>(\d{0,2}\.*\d{0,10})</td>"
    )
    .expect("Invalid regex pattern");
}

pub fn dividend_page_url(ticker: &str) -> String {
    format!("{}{}", DIVIDEND_PAGE_URL, ticker.trim().to_lowercase())
}

/// Parses the dividend table of the analytics page.
///
/// The page lists the newest dividend first; the series is returned
/// ascending. Rows with an empty dividend cell (announced, not yet declared)
/// are skipped.
pub fn parse_dividend_page(html: &str) -> Result<DividendSeries> {
    let mut dates: Vec<NaiveDateTime> = Vec::new();
    let mut dividends: Vec<f64> = Vec::new();

    for captures in DIVIDEND_ROW_REGEX.captures_iter(html) {
        let (date_cell, dividend_cell) = (&captures[1], &captures[2]);
        let Ok(date) = NaiveDate::parse_from_str(date_cell, "%d.%m.%Y") else {
            debug!("Skipping dividend row with date '{}'", date_cell);
            continue;
        };
        let Some(dividend) = parse_number(dividend_cell, date_cell)? else {
            debug!("Skipping dividend row {} without amount", date_cell);
            continue;
        };
        dates.push(start_of_day(date));
        dividends.push(dividend);
    }

    dates.reverse();
    dividends.reverse();
    let series = DividendSeries::from_pairs(&dates, &dividends);
    if series.is_empty() {
        warn!("Dividend page holds no dividends");
    }
    Ok(series)
}

/// Builds a series from two-column rows: ex-dividend date, dividend per share.
///
/// Rows missing either cell, or whose first cell is not a date, are skipped.
pub fn dividends_from_rows(rows: &[Vec<String>]) -> Result<DividendSeries> {
    let mut events = Vec::new();
    for (row, cells) in rows.iter().enumerate() {
        let (Some(date_cell), Some(dividend_cell)) = (cells.first(), cells.get(1)) else {
            continue;
        };
        let Some(date) = parse_datetime(date_cell) else {
            continue;
        };
        let location = format!("row {}, column 1", row + 1);
        if let Some(dividend) = parse_number(dividend_cell, &location)? {
            events.push(DividendEvent::new(date, dividend));
        }
    }

    info!("Loaded {} dividends from file", events.len());
    Ok(DividendSeries::new(events))
}

/// Parses a two-column dividend CSV.
pub fn parse_dividend_csv(content: &[u8]) -> Result<DividendSeries> {
    dividends_from_rows(&read_csv_rows(content)?)
}

/// Reads a dividend history file; workbooks are recognised by extension.
pub fn read_dividend_file(path: &Path) -> Result<DividendSeries> {
    debug!("Reading dividend history {}", path.display());
    if is_spreadsheet(path) {
        return dividends_from_rows(&read_first_sheet(path)?);
    }
    let content = std::fs::read(path)?;
    parse_dividend_csv(&content)
}

/// Downloads and parses the dividend history of `ticker`.
pub async fn fetch_dividends(client: &PageClient, ticker: &str) -> Result<DividendSeries> {
    let html = client.fetch_text(&dividend_page_url(ticker)).await?;
    let series = parse_dividend_page(&html)?;
    info!("Fetched {} dividends for {}", series.len(), ticker);
    Ok(series)
}
