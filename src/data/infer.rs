//! Column type inference.
//!
//! Classifies a column's raw values into numeric, categorical, date, or text
//! using ratio thresholds. Unclassifiable or empty input always resolves to
//! text; inference never fails.

use crate::constants::{
    CATEGORICAL_DISTINCT_RATIO, CATEGORICAL_MAX_UNIQUE, DATE_RATIO_THRESHOLD,
    NUMERIC_RATIO_THRESHOLD,
};
use crate::types::{CellValue, ColumnMeta, ColumnType, Row};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// Date layouts accepted by the date classification step
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Whether a string parses as a calendar date in one of the accepted layouts
pub fn is_calendar_date(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(trimmed).is_ok() || DateTime::parse_from_rfc2822(trimmed).is_ok()
    {
        return true;
    }
    if DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
    {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
}

/// Classify a column's values.
///
/// Precedence, first match wins:
/// 1. All values null or empty: text.
/// 2. At least 80% coerce to a finite number: numeric.
/// 3. At least 80% parse as a calendar date: date.
/// 4. Distinct count below half the non-null count and below 20: categorical.
/// 5. Otherwise: text.
pub fn detect_column_type(values: &[CellValue]) -> ColumnType {
    let non_null: Vec<&CellValue> = values.iter().filter(|v| !v.is_null()).collect();
    if non_null.is_empty() {
        return ColumnType::Text;
    }
    let total = non_null.len() as f64;

    let numeric_count = non_null.iter().filter(|v| v.as_number().is_some()).count();
    if numeric_count as f64 / total >= NUMERIC_RATIO_THRESHOLD {
        return ColumnType::Numeric;
    }

    let date_count = non_null
        .iter()
        .filter(|v| match v {
            CellValue::Text(s) => is_calendar_date(s),
            _ => false,
        })
        .count();
    if date_count as f64 / total >= DATE_RATIO_THRESHOLD {
        return ColumnType::Date;
    }

    let distinct: HashSet<&CellValue> = non_null.iter().copied().collect();
    if (distinct.len() as f64) < total * CATEGORICAL_DISTINCT_RATIO
        && distinct.len() < CATEGORICAL_MAX_UNIQUE
    {
        return ColumnType::Categorical;
    }

    ColumnType::Text
}

/// Distinct non-null values in first-appearance order
pub fn distinct_values(values: &[CellValue]) -> Vec<CellValue> {
    let mut seen: HashSet<&CellValue> = HashSet::new();
    let mut ordered = Vec::new();
    for value in values.iter().filter(|v| !v.is_null()) {
        if seen.insert(value) {
            ordered.push(value.clone());
        }
    }
    ordered
}

/// Derive column metadata for every header by running inference across all
/// rows. Categorical columns additionally materialize their distinct values.
pub fn build_columns(rows: &[Row], headers: &[String]) -> Vec<ColumnMeta> {
    headers
        .iter()
        .map(|header| {
            let values: Vec<CellValue> = rows
                .iter()
                .map(|row| row.get(header).cloned().unwrap_or(CellValue::Null))
                .collect();
            let column_type = detect_column_type(&values);
            let mut meta = ColumnMeta::new(header, column_type);
            if column_type == ColumnType::Categorical {
                meta.unique_values = Some(distinct_values(&values));
            }
            meta
        })
        .collect()
}
