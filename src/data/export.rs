//! CSV export of the current filtered/sorted rows.
//!
//! Quoting strategy: every value renders as a JSON scalar (strings
//! JSON-quoted and escaped, numbers and booleans bare, missing values as
//! `""`). This is not RFC 4180 CSV escaping; a value containing a comma is
//! emitted as-is inside its JSON quotes. The crate's own CSV parser strips
//! one pair of surrounding quotes, so exported files re-parse cleanly.

use crate::data::error::DataResult;
use crate::types::{CellValue, Row};

/// Serialize rows to CSV text.
///
/// The header row comes from the first row's key order, not from any global
/// schema; later rows emit their values in that same key order, with missing
/// keys rendered as an empty quoted string. An empty row set serializes to
/// an empty string.
pub fn to_csv(rows: &[Row]) -> DataResult<String> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.keys().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| render_scalar(row.get(header)))
            .collect();
        lines.push(cells.join(","));
    }

    tracing::debug!(rows = rows.len(), "Exported CSV");
    Ok(lines.join("\n"))
}

/// Derive the download file name from the uploaded file's name
pub fn export_file_name(upload_name: Option<&str>) -> String {
    let base = match upload_name {
        Some(name) => {
            // Strip the last extension, if any
            match name.rsplit_once('.') {
                Some((stem, _)) if !stem.is_empty() => stem,
                _ => name,
            }
        }
        None => "filtered-data",
    };
    format!("{base}-filtered.csv")
}

/// Render one cell as a JSON scalar
fn render_scalar(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Null) => "\"\"".to_string(),
        Some(CellValue::Text(s)) => {
            serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
        }
        Some(cell) => cell.to_display_string(),
    }
}
