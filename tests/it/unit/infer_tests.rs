//! Unit tests for column type inference through the public parsing API.

use databoard::data::{detect_column_type, parse_csv};
use databoard::{CellValue, ColumnType};

#[test]
fn test_three_quarters_numeric_is_not_numeric() {
    // 3 of 4 values parse as numbers: 0.75 is under the 0.8 threshold, so
    // classification falls through to the categorical/text path.
    let values: Vec<CellValue> = ["1", "2", "abc", "4"]
        .iter()
        .map(|s| CellValue::from_raw(s))
        .collect();
    let detected = detect_column_type(&values);
    assert_ne!(detected, ColumnType::Numeric);
    assert_eq!(detected, ColumnType::Text);
}

#[test]
fn test_four_fifths_numeric_meets_threshold() {
    let values: Vec<CellValue> = ["1", "2", "abc", "4", "5"]
        .iter()
        .map(|s| CellValue::from_raw(s))
        .collect();
    assert_eq!(detect_column_type(&values), ColumnType::Numeric);
}

#[test]
fn test_parsed_categorical_column_carries_unique_values() {
    let csv = "status,count\n\
               open,1\n\
               closed,2\n\
               open,3\n\
               open,4\n\
               closed,5";
    let table = parse_csv(csv).unwrap();
    let status = table.column("status").unwrap();

    assert_eq!(status.column_type, ColumnType::Categorical);
    let uniques = status.unique_values.as_ref().unwrap();
    // First-appearance order, fewer than half the non-null count
    assert_eq!(
        uniques,
        &vec![
            CellValue::Text("open".into()),
            CellValue::Text("closed".into())
        ]
    );
    assert!(uniques.len() * 2 < table.row_count());
}

#[test]
fn test_all_null_column_is_text() {
    let csv = "a,b\n1,\n2,\n3,";
    let table = parse_csv(csv).unwrap();
    assert_eq!(table.column("b").unwrap().column_type, ColumnType::Text);
}

#[test]
fn test_date_column_detected_in_parsed_table() {
    let csv = "day,visits\n2024-03-01,10\n2024-03-02,12\n2024-03-03,9";
    let table = parse_csv(csv).unwrap();
    assert_eq!(table.column("day").unwrap().column_type, ColumnType::Date);
    assert_eq!(
        table.column("visits").unwrap().column_type,
        ColumnType::Numeric
    );
}
