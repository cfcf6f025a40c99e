//! Import of the broker's trade report.
//!
//! The report comes as the broker's native workbook (`.xls`, `.xlsx`) or as a
//! CSV export of it; both share a fixed column layout. Rows without a ticker
//! or without a parseable trade date (titles, headers, totals) are skipped,
//! as are non-trade operations such as currency conversions. Rows that look
//! like trades but carry malformed numbers fail the import.

use divfolio_core::errors::ValidationError;
use divfolio_core::ledger::{TradeDirection, TradeLedger, TradeRecord};
use log::{debug, info};
use std::path::Path;

use crate::errors::{MarketDataError, Result};
use crate::parsing::{parse_datetime, parse_number, read_csv_rows};
use crate::spreadsheet::{is_spreadsheet, read_first_sheet};

pub const TRADE_DATE_COLUMN: usize = 0;
pub const TICKER_COLUMN: usize = 3;
pub const DIRECTION_COLUMN: usize = 6;
pub const QUANTITY_COLUMN: usize = 7;
pub const PRICE_COLUMN: usize = 8;
pub const VOLUME_COLUMN: usize = 10;
pub const BROKER_FEE_COLUMN: usize = 14;
pub const SYSTEM_FEE_COLUMN: usize = 16;

fn cell(cells: &[String], column: usize) -> &str {
    cells.get(column).map(|value| value.trim()).unwrap_or("")
}

fn required_number(cells: &[String], row: usize, column: usize, name: &str) -> Result<f64> {
    let location = format!("row {}, column {}", row + 1, column);
    parse_number(cell(cells, column), &location)?
        .ok_or_else(|| divfolio_core::Error::from(ValidationError::MissingField(name.to_string())).into())
}

/// Empty fee cells mean no fee was charged.
fn optional_number(cells: &[String], row: usize, column: usize) -> Result<f64> {
    let location = format!("row {}, column {}", row + 1, column);
    Ok(parse_number(cell(cells, column), &location)?.unwrap_or(0.0))
}

fn parse_row(cells: &[String], row: usize) -> Result<Option<TradeRecord>> {
    let ticker = cell(cells, TICKER_COLUMN);
    if ticker.is_empty() {
        return Ok(None);
    }
    let Some(timestamp) = parse_datetime(cell(cells, TRADE_DATE_COLUMN)) else {
        debug!("Skipping row {}: no trade date", row + 1);
        return Ok(None);
    };
    let Ok(direction) = cell(cells, DIRECTION_COLUMN).parse::<TradeDirection>() else {
        debug!(
            "Skipping row {}: '{}' is not a trade of {}",
            row + 1,
            cell(cells, DIRECTION_COLUMN),
            ticker
        );
        return Ok(None);
    };

    let trade = TradeRecord::new(
        timestamp,
        ticker,
        direction,
        required_number(cells, row, QUANTITY_COLUMN, "quantity")?,
        required_number(cells, row, PRICE_COLUMN, "price")?,
        required_number(cells, row, VOLUME_COLUMN, "volume")?,
    )
    .with_fees(
        optional_number(cells, row, BROKER_FEE_COLUMN)?,
        optional_number(cells, row, SYSTEM_FEE_COLUMN)?,
    );
    Ok(Some(trade))
}

/// Builds a ledger from report rows. Records keep the report's order.
///
/// Records are not validated here: the accountant validates the trades of
/// the ticker it analyses and never reads the others.
pub fn ledger_from_rows(rows: &[Vec<String>]) -> Result<TradeLedger> {
    let mut trades = Vec::new();
    for (row, cells) in rows.iter().enumerate() {
        if let Some(trade) = parse_row(cells, row)? {
            trades.push(trade);
        }
    }

    if trades.is_empty() {
        return Err(MarketDataError::NoData(
            "trade report contains no trades".to_string(),
        ));
    }
    info!("Imported {} trades", trades.len());
    Ok(TradeLedger::new(trades))
}

/// Parses a trade report exported as CSV.
pub fn parse_ledger(content: &[u8]) -> Result<TradeLedger> {
    ledger_from_rows(&read_csv_rows(content)?)
}

/// Reads a trade report from disk; workbooks are recognised by extension.
pub fn read_ledger(path: &Path) -> Result<TradeLedger> {
    debug!("Reading trade report {}", path.display());
    if is_spreadsheet(path) {
        return ledger_from_rows(&read_first_sheet(path)?);
    }
    let content = std::fs::read(path)?;
    parse_ledger(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use std::path::PathBuf;

    const HEADER: &str = "Дата сделки;Время;Номер;Код;ISIN;Рынок;Вид;Кол-во;Цена;НКД;Сумма;Валюта;Курс;Сумма руб;Комиссия брокера;Валюта;Комиссия ТС";

    fn report(rows: &[&str]) -> String {
        let mut lines = vec!["Отчет брокера", HEADER];
        lines.extend_from_slice(rows);
        lines.push(";;;;;;;;;;Итого;;;;;;");
        lines.join("\n")
    }

    #[test]
    fn test_parse_ledger_reads_fixed_columns() {
        let content = report(&[
            "15.03.2021 10:20:30;;1;SBER;RU0009029540;ФР;Купля;10;290,5;;29050;RUB;;;14,53;RUB;2,9",
            "2021-06-01 11:00:00;;2;SBER;RU0009029540;ФР;Продажа;5;310;;15500;RUB;;;7,75;RUB;",
        ]);
        let ledger = parse_ledger(content.as_bytes()).unwrap();

        assert_eq!(ledger.len(), 2);
        let first = &ledger.records()[0];
        assert_eq!(
            first.timestamp,
            NaiveDate::from_ymd_opt(2021, 3, 15)
                .unwrap()
                .and_hms_opt(10, 20, 30)
                .unwrap()
        );
        assert_eq!(first.ticker, "SBER");
        assert_eq!(first.direction, TradeDirection::Buy);
        assert_eq!(first.quantity, 10.0);
        assert_eq!(first.unit_price, 290.5);
        assert_eq!(first.volume, 29050.0);
        assert!((first.fees() - 17.43).abs() < 1e-9);

        let second = &ledger.records()[1];
        assert_eq!(second.direction, TradeDirection::Sell);
        assert_eq!(second.system_fee, 0.0);
    }

    #[test]
    fn test_parse_ledger_skips_rows_without_date_or_ticker() {
        let content = report(&[
            "15.03.2021;;1;;;;Купля;10;290;;2900;;;;0;;0",
            "not a date;;1;SBER;;;Купля;10;290;;2900;;;;0;;0",
            "16.03.2021;;1;GAZP;;;Купля;1;200;;2000;;;;0;;0",
        ]);
        let ledger = parse_ledger(content.as_bytes()).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].ticker, "GAZP");
    }

    #[test]
    fn test_parse_ledger_fails_on_malformed_trade() {
        let content = report(&["15.03.2021;;1;SBER;;;Купля;ten;290;;2900;;;;0;;0"]);
        let error = parse_ledger(content.as_bytes()).unwrap_err();
        assert!(matches!(error, MarketDataError::Parse { .. }));

        let content = report(&["15.03.2021;;1;SBER;;;Купля;10;290;;;;;;0;;0"]);
        let error = parse_ledger(content.as_bytes()).unwrap_err();
        assert!(matches!(error, MarketDataError::Core(_)));
    }

    #[test]
    fn test_parse_ledger_skips_non_trade_operations() {
        let content = report(&[
            "15.03.2021;;1;SBER;;;Купля;10;290;;2900;;;;0;;0",
            "16.03.2021;;2;USD000UTSTOM;;;Конвертация;1;75;;75;;;;0;;0",
        ]);
        let ledger = parse_ledger(content.as_bytes()).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].ticker, "SBER");
    }

    #[test]
    fn test_parse_ledger_keeps_invalid_rows_of_other_instruments() {
        let content = report(&[
            "15.03.2021;;1;SBER;;;Купля;10;290;;2900;;;;0;;0",
            "16.03.2021;;2;GAZP;;;Купля;0;200;;0;;;;0;;0",
        ]);
        let ledger = parse_ledger(content.as_bytes()).unwrap();

        assert_eq!(ledger.len(), 2);
        assert!(ledger.validate_trades_for("SBER").is_ok());
        assert!(ledger.validate_trades_for("GAZP").is_err());
    }

    #[test]
    fn test_parse_ledger_without_trades_is_an_error() {
        let content = report(&[]);
        assert!(matches!(
            parse_ledger(content.as_bytes()),
            Err(MarketDataError::NoData(_))
        ));
    }

    #[test]
    fn test_read_ledger_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            report(&["15.03.2021;;1;MOEX;;;Купля;1;100;;1000;;;;1;;0,5"])
        )
        .unwrap();

        let ledger = read_ledger(file.path()).unwrap();
        assert_eq!(ledger.tickers(), vec!["MOEX".to_string()]);
        assert!((ledger.records()[0].implied_lot() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_read_ledger_from_workbook() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("trades.xlsx");
        let ledger = read_ledger(&path).unwrap();

        assert_eq!(ledger.len(), 2);
        let buy = &ledger.records()[0];
        assert_eq!(
            buy.timestamp,
            NaiveDate::from_ymd_opt(2021, 3, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
        assert_eq!(buy.direction, TradeDirection::Buy);
        assert_eq!(buy.quantity, 10.0);
        assert_eq!(buy.unit_price, 290.5);
        assert!((buy.fees() - 1.75).abs() < 1e-9);

        let sell = &ledger.records()[1];
        assert_eq!(sell.direction, TradeDirection::Sell);
        assert_eq!(sell.volume, 1550.0);
        assert_eq!(sell.broker_fee, 0.78);
        assert_eq!(sell.system_fee, 0.0);
    }

    #[test]
    fn test_read_ledger_missing_file() {
        let error = read_ledger(Path::new("/nonexistent/report.csv")).unwrap_err();
        assert!(matches!(error, MarketDataError::Io(_)));
    }
}
