//! Export → file → re-parse round trips.

use crate::helpers::sales_csv;
use anyhow::Result;
use databoard::data::{parse_bytes, parse_csv, to_csv};
use databoard::{Dashboard, FileFormat};
use std::fs;

#[test]
fn test_exported_file_reparses_with_same_shape() -> Result<()> {
    let table = parse_csv(sales_csv())?;
    let exported = to_csv(&table.rows)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sales-filtered.csv");
    fs::write(&path, &exported)?;

    let bytes = fs::read(&path)?;
    let reparsed = parse_bytes(&bytes, FileFormat::Csv)?;

    assert_eq!(reparsed.row_count(), table.row_count());
    let original_headers: Vec<&str> = table.rows[0].keys().collect();
    let reparsed_headers: Vec<&str> = reparsed.rows[0].keys().collect();
    assert_eq!(original_headers, reparsed_headers);

    for (a, b) in table.rows.iter().zip(reparsed.rows.iter()) {
        for (key, value) in a.iter() {
            assert_eq!(Some(value), b.get(key), "column {key}");
        }
    }

    // Column types survive the trip as well
    for column in &table.columns {
        let reparsed_column = reparsed.column(&column.name).unwrap();
        assert_eq!(column.column_type, reparsed_column.column_type);
    }
    Ok(())
}

#[test]
fn test_filtered_export_reparses_and_reloads() -> Result<()> {
    let mut board = Dashboard::new();
    board.upload_bytes(sales_csv().as_bytes(), FileFormat::Csv, "sales.csv")?;
    board.set_search_query("east");

    let exported = board.export_csv()?;
    let reparsed = parse_csv(&exported)?;
    assert_eq!(reparsed.row_count(), board.filtered_rows().len());

    // The exported subset can itself be loaded as a fresh table
    let mut second = Dashboard::new();
    second.upload_bytes(
        exported.as_bytes(),
        FileFormat::Csv,
        board.export_file_name(),
    )?;
    assert_eq!(second.rows().len(), 4);
    assert_eq!(second.file_name(), Some("sales-filtered.csv"));
    Ok(())
}
