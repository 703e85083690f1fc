//! Error types for dictionary and catalog ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading data dictionaries or catalog tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Data Dictionary Errors ===
    /// Failed to parse the dictionary CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// No table-name or column-name header was found.
    #[error("data dictionary {path} does not contain the columns table names or column names")]
    MissingDictionaryColumns { path: PathBuf },

    /// Spreadsheet dictionary given without a sheet name.
    #[error("a sheet name is required to read spreadsheet {path}")]
    SheetNameRequired { path: PathBuf },

    /// Extension is neither CSV nor a spreadsheet.
    #[error("data dictionary should be a CSV or spreadsheet file: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to open or read a spreadsheet.
    #[error("failed to read spreadsheet {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The named worksheet is not in the workbook.
    #[error("worksheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    // === Catalog Errors ===
    /// Table has no entry in the catalog.
    #[error("table '{table}' not found in catalog database '{database}'")]
    TableNotFound { database: String, table: String },

    /// Catalog document is not valid JSON.
    #[error("failed to parse catalog table {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog document is JSON but not a table definition.
    #[error("unexpected catalog table format in {path}: {reason}")]
    CatalogFormat { path: PathBuf, reason: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
