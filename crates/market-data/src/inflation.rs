//! Monthly consumer price inflation scraped from the statistics bureau page.

use divfolio_core::constants::MONTHS_PER_YEAR;
use divfolio_core::market_data::InflationTable;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

use crate::client::PageClient;
use crate::errors::{MarketDataError, Result};
use crate::parsing::{decode_content, parse_number};

pub const INFLATION_PAGE_URL: &str = "https://www.statbureau.org/ru/russia/inflation-tables";

/// Oldest year read from the page.
pub const EARLIEST_YEAR: i32 = 2000;

lazy_static! {
    static ref YEAR_LINK_REGEX: Regex =
        Regex::new(r#"href="/ru/russia/inflation/(\d{4})"#).expect("Invalid regex pattern");
    static ref MONTH_RATE_REGEX: Regex =
        Regex::new(r"-?\d{1,2},\d{1,2}").expect("Invalid regex pattern");
}

/// Parses the inflation table page.
///
/// A row begins at a year link and ends at `</tr>` or the next year link.
/// Its last rate is the yearly total and is dropped; at most twelve monthly
/// rates remain. Rows are read newest first down to [`EARLIEST_YEAR`].
pub fn parse_inflation_page(html: &str) -> Result<InflationTable> {
    let links: Vec<(i32, usize, usize)> = YEAR_LINK_REGEX
        .captures_iter(html)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let year = captures[1].parse::<i32>().ok()?;
            Some((year, whole.start(), whole.end()))
        })
        .collect();

    let mut years: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for (index, &(year, _, row_start)) in links.iter().enumerate() {
        if years.contains_key(&year) {
            continue;
        }
        let next_link = links.get(index + 1).map_or(html.len(), |link| link.1);
        let row = &html[row_start..next_link];
        let row = row.find("</tr>").map_or(row, |end| &row[..end]);

        let mut rates = Vec::new();
        for found in MONTH_RATE_REGEX.find_iter(row) {
            if let Some(rate) = parse_number(found.as_str(), &format!("inflation {}", year))? {
                rates.push(rate);
            }
        }
        rates.pop();
        rates.truncate(MONTHS_PER_YEAR);

        if rates.is_empty() {
            debug!("Inflation row {} holds no monthly rates", year);
        } else {
            years.insert(year, rates);
        }
        if year == EARLIEST_YEAR {
            break;
        }
    }

    if years.is_empty() {
        return Err(MarketDataError::NoData(
            "inflation page holds no yearly rows".to_string(),
        ));
    }
    let table = InflationTable::from_years(years);
    table.validate()?;
    info!(
        "Loaded inflation for {} years, latest {:?}",
        table.years_desc().count(),
        table.latest_year()
    );
    Ok(table)
}

/// Parses a saved copy of the inflation page.
pub fn read_inflation_file(path: &Path) -> Result<InflationTable> {
    debug!("Reading inflation page {}", path.display());
    let content = std::fs::read(path)?;
    parse_inflation_page(&decode_content(&content))
}

pub async fn fetch_inflation(client: &PageClient) -> Result<InflationTable> {
    let html = client.fetch_text(INFLATION_PAGE_URL).await?;
    parse_inflation_page(&html)
}
