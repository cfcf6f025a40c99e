//! First-sheet reader for the broker's native `.xls`/`.xlsx` exports.
//!
//! Cells are turned into the same text the CSV export carries, so both
//! formats share one row parser.

use calamine::{open_workbook_auto, Data, DataType, Reader};
use log::debug;
use std::path::Path;

use crate::errors::{MarketDataError, Result};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "ods"];

const CELL_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// True when the file extension names a workbook format.
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| extension.eq_ignore_ascii_case(known))
        })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) | Data::DateTimeIso(value) => value.trim().to_string(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|value| value.format(CELL_DATE_TIME_FORMAT).to_string())
            .unwrap_or_default(),
        other => {
            debug!("Ignoring cell {:?}", other);
            String::new()
        }
    }
}

/// Reads the first worksheet as rows of cell text, indexed from cell A1.
pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or_else(|| {
        MarketDataError::NoData(format!("{} holds no worksheets", path.display()))
    })??;

    // The used range starts at the first non-empty cell, not at A1.
    let (first_row, first_column) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); first_column as usize];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn test_is_spreadsheet_by_extension() {
        assert!(is_spreadsheet(Path::new("report.xls")));
        assert!(is_spreadsheet(Path::new("report.XLSX")));
        assert!(!is_spreadsheet(Path::new("report.csv")));
        assert!(!is_spreadsheet(Path::new("report")));
    }

    #[test]
    fn test_cell_text_matches_csv_cells() {
        assert_eq!(cell_text(&Data::Float(290.5)), "290.5");
        assert_eq!(cell_text(&Data::Float(10.0)), "10");
        assert_eq!(cell_text(&Data::Int(3)), "3");
        assert_eq!(cell_text(&Data::String(" SBER ".to_string())), "SBER");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_read_first_sheet_formats_date_cells() {
        let rows = read_first_sheet(&fixture("trades.xlsx")).unwrap();

        assert_eq!(rows[0][0], "Отчет брокера");
        assert_eq!(rows[2][0], "2021-03-15 12:00:00");
        assert_eq!(rows[2][3], "SBER");
        assert_eq!(rows[3][0], "01.06.2021 11:00:00");
    }

    #[test]
    fn test_read_first_sheet_missing_file() {
        assert!(read_first_sheet(Path::new("/nonexistent/report.xlsx")).is_err());
    }
}
