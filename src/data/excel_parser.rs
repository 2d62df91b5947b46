//! Excel workbook parsing.
//!
//! Reads the first worksheet of an in-memory workbook (xls, xlsx, xlsm,
//! xlsb) into rows plus inferred column metadata. The first row supplies the
//! headers; the rest are data.

use crate::data::error::{DataError, DataResult};
use crate::data::infer::build_columns;
use crate::types::{CellValue, Row, Table};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use chrono::NaiveTime;
use std::io::Cursor;

/// Parse workbook bytes into a table.
///
/// Fails with [`DataError::EmptyWorkbook`] when the first sheet has no
/// usable data rows.
pub fn parse_workbook(bytes: &[u8]) -> DataResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DataError::EmptyWorkbook)??;

    let mut sheet_rows = range.rows();
    let header_row = sheet_rows.next().ok_or(DataError::EmptyWorkbook)?;
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = DataType::as_string(cell).unwrap_or_else(|| cell.to_string());
            let name = name.trim().to_string();
            if name.is_empty() {
                format!("column_{}", i + 1)
            } else {
                name
            }
        })
        .collect();
    if headers.is_empty() {
        return Err(DataError::NoColumns);
    }

    let mut rows: Vec<Row> = Vec::new();
    for sheet_row in sheet_rows {
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = sheet_row.get(i).map(convert_cell).unwrap_or(CellValue::Null);
                (header.clone(), value)
            })
            .collect();
        if row.values().all(|v| v.is_null()) {
            continue;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DataError::EmptyWorkbook);
    }

    let columns = build_columns(&rows, &headers);
    tracing::debug!(rows = rows.len(), columns = columns.len(), "Parsed workbook");

    Ok(Table { rows, columns })
}

/// Map a calamine cell onto a [`CellValue`].
///
/// Date cells render as ISO strings so the inference engine can classify
/// their column as a date column. String cells go through the same numeric
/// round-trip coercion as CSV cells.
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) if f.is_finite() => CellValue::Number(*f),
        Data::Float(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::from_raw(s),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) => {
                let text = if dt.time() == NaiveTime::MIN {
                    dt.date().format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                };
                CellValue::Text(text)
            }
            None => CellValue::Null,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Null,
    }
}
