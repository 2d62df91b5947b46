//! CSV parsing.
//!
//! Converts delimited text into rows plus inferred column metadata. Parsing
//! is a pure transform: no side effects beyond reading the input.
//!
//! Cells are comma-split with no quoted-comma escaping beyond stripping a
//! single pair of surrounding quote characters; this mirrors the export
//! module's JSON-scalar quoting so exported files re-parse cleanly.

use crate::data::error::{DataError, DataResult};
use crate::data::infer::build_columns;
use crate::types::{CellValue, Row, Table};

/// Parse CSV text into a table.
///
/// The first non-blank line is the header; every later non-blank line is a
/// data row. Each cell attempts numeric coercion and falls back to a trimmed
/// string; empty and missing trailing cells become null.
///
/// Fails with [`DataError::NotEnoughRows`] unless at least a header row and
/// one data row are present.
pub fn parse_csv(content: &str) -> DataResult<Table> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(DataError::NotEnoughRows)?;
    let headers: Vec<String> = header_line
        .split(',')
        .map(|cell| strip_quotes(cell.trim()).trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataError::NoColumns);
    }

    let mut rows: Vec<Row> = Vec::new();
    for line in lines {
        let cells: Vec<&str> = line.split(',').map(|cell| strip_quotes(cell.trim())).collect();
        let row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = cells
                    .get(i)
                    .map(|cell| CellValue::from_raw(cell))
                    .unwrap_or(CellValue::Null);
                (header.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DataError::NotEnoughRows);
    }

    let columns = build_columns(&rows, &headers);
    tracing::debug!(rows = rows.len(), columns = columns.len(), "Parsed CSV");

    Ok(Table { rows, columns })
}

/// Strip one pair of surrounding quote characters, if present
fn strip_quotes(cell: &str) -> &str {
    if cell.len() >= 2 && cell.starts_with('"') && cell.ends_with('"') {
        &cell[1..cell.len() - 1]
    } else {
        cell
    }
}
