//! Error types for data operations
//!
//! Provides unified error handling for all parsing and export operations.
//! Coercion failures during filtering or type inference are deliberately not
//! errors: they resolve silently (row excluded, classification falls through).
//! Every variant here is recoverable; the caller retries with different input.

use thiserror::Error;

/// Errors that can occur during parsing or export
#[derive(Error, Debug)]
pub enum DataError {
    /// No columns found in data
    #[error("No columns found")]
    NoColumns,

    /// CSV upload needs at least a header row and one data row
    #[error("File must have at least a header row and one data row")]
    NotEnoughRows,

    /// Workbook has no usable rows
    #[error("Spreadsheet is empty")]
    EmptyWorkbook,

    /// Spreadsheet parsing error from calamine
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
