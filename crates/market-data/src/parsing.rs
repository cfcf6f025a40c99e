//! Cell-level helpers shared by the CSV and spreadsheet importers.

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use divfolio_core::utils::time_utils::start_of_day;
use log::warn;

use crate::errors::{MarketDataError, Result};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d"];

/// Parses a broker date cell. Date-only cells resolve to midnight.
pub fn parse_datetime(cell: &str) -> Option<NaiveDateTime> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .map(start_of_day)
        })
}

/// Parses a numeric cell written with either decimal separator.
///
/// Spaces (including non-breaking ones) are treated as thousands separators.
/// Returns `None` for an empty cell.
pub fn parse_number(cell: &str, location: &str) -> Result<Option<f64>> {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|e| MarketDataError::parse(location, format!("invalid number '{}': {}", cell.trim(), e)))
}

/// Decodes file content to UTF-8, dropping a BOM if present.
pub fn decode_content(content: &[u8]) -> String {
    let without_bom = content.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(content);
    match std::str::from_utf8(without_bom) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!(
                "Invalid UTF-8 at byte {}: {}. Some characters may be replaced.",
                e.valid_up_to(),
                e
            );
            String::from_utf8_lossy(without_bom).into_owned()
        }
    }
}

/// Picks the most frequent candidate delimiter in the first lines.
///
/// Commas lose ties so that `;`-separated files with decimal commas are
/// recognised.
pub fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(10).collect();
    let count = |delimiter: char| -> usize {
        sample
            .iter()
            .map(|line| line.matches(delimiter).count())
            .sum()
    };

    [';', '\t', ',']
        .into_iter()
        .map(|delimiter| (delimiter, count(delimiter)))
        .fold((',', 0usize), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
        .0 as u8
}

/// Splits CSV content into rows of cell text. Rows may differ in length.
pub fn read_csv_rows(content: &[u8]) -> Result<Vec<Vec<String>>> {
    let text = decode_content(content);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(detect_delimiter(&text))
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_datetime_accepts_broker_formats() {
        assert_eq!(parse_datetime("2021-03-15 10:20:30"), Some(at(2021, 3, 15, 10, 20, 30)));
        assert_eq!(parse_datetime("15.03.2021 10:20:30"), Some(at(2021, 3, 15, 10, 20, 30)));
        assert_eq!(parse_datetime("15.03.2021"), Some(at(2021, 3, 15, 0, 0, 0)));
        assert_eq!(parse_datetime(" 2021-03-15 "), Some(at(2021, 3, 15, 0, 0, 0)));
    }

    #[test]
    fn test_parse_datetime_rejects_headers() {
        assert_eq!(parse_datetime("Дата сделки"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn test_parse_number_accepts_decimal_comma() {
        assert_eq!(parse_number("1 234,50", "test").unwrap(), Some(1234.5));
        assert_eq!(parse_number("12.25", "test").unwrap(), Some(12.25));
        assert_eq!(parse_number("  ", "test").unwrap(), None);
    }

    #[test]
    fn test_parse_number_reports_location() {
        let error = parse_number("abc", "row 3, column 8").unwrap_err();
        assert!(matches!(
            error,
            MarketDataError::Parse { ref location, .. } if location == "row 3, column 8"
        ));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;1,5;c\nd;e;2,5;f"), b';');
        assert_eq!(detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("single"), b',');
    }

    #[test]
    fn test_read_csv_rows_keeps_ragged_rows() {
        let rows = read_csv_rows("Отчет\na;b;1,5\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Отчет"]);
        assert_eq!(rows[1], vec!["a", "b", "1,5"]);
    }

    #[test]
    fn test_decode_content_strips_bom() {
        let content = [&[0xEF, 0xBB, 0xBF][..], "Купля".as_bytes()].concat();
        assert_eq!(decode_content(&content), "Купля");
    }
}
