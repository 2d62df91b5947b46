//! Data parsing and handling module
//!
//! Parsers for the supported upload formats, the type inference engine,
//! the chart data/recommendation engines, and CSV export.
//!
//! ## Error Handling
//!
//! All operations return `DataResult<T>` using the `DataError` type.
//! Cell-level coercion failures are never errors; they resolve silently
//! (row excluded, classification falls through to the next type).

mod chart_engine;
mod csv_parser;
mod error;
mod excel_parser;
mod export;
mod infer;
mod recommend;

pub use chart_engine::*;
pub use csv_parser::*;
pub use error::*;
pub use excel_parser::*;
pub use export::*;
pub use infer::*;
pub use recommend::*;

use crate::types::Table;

/// Supported upload formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Spreadsheet,
}

/// Parse uploaded file bytes into a table.
///
/// A pure transform from bytes to rows plus column metadata; the only side
/// effect is reading the input.
pub fn parse_bytes(bytes: &[u8], format: FileFormat) -> DataResult<Table> {
    match format {
        FileFormat::Csv => parse_csv(&String::from_utf8_lossy(bytes)),
        FileFormat::Spreadsheet => parse_workbook(bytes),
    }
}
