//! Data dictionary loading.
//!
//! A data dictionary lists, per table, the column names the catalog is
//! expected to carry. The file (CSV, or one worksheet of a spreadsheet) needs
//! one header containing "table" and one containing "column"; every other
//! column is ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use csv::{ReaderBuilder, Trim};
use dictmatch_model::DataDictionary;
use tracing::debug;

use crate::error::{IngestError, Result};

/// File formats a data dictionary may come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryFormat {
    Csv,
    /// `.xls` and its variants (`.xlsx`, `.xlsm`, `.xlsb`).
    Spreadsheet,
}

impl DictionaryFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "csv" {
            Some(Self::Csv)
        } else if ext.starts_with("xls") && ext.len() <= 4 {
            Some(Self::Spreadsheet)
        } else {
            None
        }
    }
}

/// Reads a data dictionary file.
///
/// CSV files are read whole. Spreadsheets need `sheet`, the worksheet that
/// holds the dictionary; its first row is the header row.
pub fn read_data_dictionary(path: &Path, sheet: Option<&str>) -> Result<DataDictionary> {
    let Some(format) = DictionaryFormat::from_path(path) else {
        return Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };
    let sheet = sheet.map(str::trim).filter(|s| !s.is_empty());
    if format == DictionaryFormat::Spreadsheet && sheet.is_none() {
        return Err(IngestError::SheetNameRequired {
            path: path.to_path_buf(),
        });
    }
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    match (format, sheet) {
        (DictionaryFormat::Spreadsheet, Some(sheet)) => read_worksheet(path, sheet),
        _ => {
            let file = File::open(path).map_err(|source| IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            read_data_dictionary_from_reader(file, path)
        }
    }
}

/// Reads CSV dictionary content from any reader.
///
/// `source` names the input in errors and logs.
pub fn read_data_dictionary_from_reader<R: Read>(
    reader: R,
    source: &Path,
) -> Result<DataDictionary> {
    let csv_err = |err: csv::Error| IngestError::CsvParse {
        path: source.to_path_buf(),
        source: err,
    };
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(normalize_cell)
        .collect();
    let rows = reader.into_records().map(|record| {
        record
            .map(|r| r.iter().map(normalize_cell).collect::<Vec<_>>())
            .map_err(csv_err)
    });
    group_rows(&headers, rows, source)
}

fn read_worksheet(path: &Path, sheet: &str) -> Result<DataDictionary> {
    let spreadsheet_err = |err: calamine::Error| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        source: err,
    };
    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(IngestError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        });
    }
    let range = workbook.worksheet_range(sheet).map_err(spreadsheet_err)?;
    let mut rows = range.rows().map(|row| {
        row.iter()
            .map(|cell| normalize_cell(&cell.to_string()))
            .collect::<Vec<_>>()
    });
    let headers = rows.next().unwrap_or_default();
    debug!(path = %path.display(), sheet, rows = range.height(), "worksheet opened");
    group_rows(&headers, rows.map(Ok), path)
}

/// Groups `(table, column)` cells of each row into a dictionary.
///
/// Rows with an empty table or column cell are skipped.
fn group_rows<I>(headers: &[String], rows: I, source: &Path) -> Result<DataDictionary>
where
    I: IntoIterator<Item = Result<Vec<String>>>,
{
    let Some((table_idx, column_idx)) = dictionary_columns(headers) else {
        return Err(IngestError::MissingDictionaryColumns {
            path: source.to_path_buf(),
        });
    };
    debug!(
        table_header = %headers[table_idx],
        column_header = %headers[column_idx],
        "dictionary headers detected"
    );

    let mut dictionary = DataDictionary::new();
    let mut skipped = 0usize;
    for row in rows {
        let row = row?;
        let table = row.get(table_idx).map(String::as_str).unwrap_or_default();
        let column = row.get(column_idx).map(String::as_str).unwrap_or_default();
        if table.is_empty() || column.is_empty() {
            skipped += 1;
            continue;
        }
        dictionary.push_column(table, column);
    }
    debug!(
        path = %source.display(),
        tables = dictionary.len(),
        skipped,
        "data dictionary loaded"
    );
    Ok(dictionary)
}

/// Positions of the table-name and column-name headers.
///
/// The last header mentioning "table" names the table; otherwise the last
/// header mentioning "column" names the column.
fn dictionary_columns(headers: &[String]) -> Option<(usize, usize)> {
    let mut table = None;
    let mut column = None;
    for (idx, header) in headers.iter().enumerate() {
        let lower = header.to_lowercase();
        if lower.contains("table") {
            table = Some(idx);
        } else if lower.contains("column") {
            column = Some(idx);
        }
    }
    Some((table?, column?))
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}
