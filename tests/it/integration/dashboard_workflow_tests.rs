//! End-to-end dashboard workflows: upload, query, chart, export.

use crate::helpers::{init_tracing, sales_csv};
use databoard::{
    CellValue, ChartType, ColumnFilter, Dashboard, FileFormat, MockBackend, QueryRequest,
    SortDirection,
};

fn upload_sales() -> Dashboard {
    init_tracing();
    let mut board = Dashboard::new();
    board
        .upload_bytes(sales_csv().as_bytes(), FileFormat::Csv, "sales.csv")
        .unwrap();
    board
}

#[test]
fn test_upload_filter_sort_page_export() {
    let mut board = upload_sales();
    assert_eq!(board.rows().len(), 8);

    board.set_column_filter(
        "region",
        ColumnFilter::Membership {
            values: vec![CellValue::Text("east".into())],
        },
    );
    board.set_sort_field("revenue");
    board.set_sort_direction(SortDirection::Descending);
    board.set_rows_per_page(2);

    let page = board.page();
    assert_eq!(page.total_pages, 2);
    let revenues: Vec<f64> = page
        .rows
        .iter()
        .map(|r| r.get("revenue").unwrap().as_number().unwrap())
        .collect();
    assert_eq!(revenues, vec![300.0, 260.0]);

    board.set_current_page(2);
    let page = board.page();
    let revenues: Vec<f64> = page
        .rows
        .iter()
        .map(|r| r.get("revenue").unwrap().as_number().unwrap())
        .collect();
    assert_eq!(revenues, vec![175.0, 100.0]);

    // Export serializes the whole filtered/sorted set, not just the page
    let csv = board.export_csv().unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert_eq!(board.export_file_name(), "sales-filtered.csv");
}

#[test]
fn test_search_narrows_before_filters() {
    let mut board = upload_sales();
    board.set_search_query("WEST");
    assert_eq!(board.filtered_rows().len(), 2);

    board.set_column_filter(
        "revenue",
        ColumnFilter::Range {
            min: Some(220.0),
            max: None,
        },
    );
    assert_eq!(board.filtered_rows().len(), 1);
}

#[test]
fn test_accepting_a_recommendation_charts_filtered_data() {
    let mut board = upload_sales();

    let recs = board.recommendations();
    let bar = recs
        .iter()
        .find(|r| r.chart_type == ChartType::Bar)
        .cloned()
        .expect("sales fixture qualifies for a bar chart");
    assert_eq!(bar.x_axis, "region");

    let config = bar.into_config();
    board.add_chart(config.clone());
    assert_eq!(board.charts().len(), 1);

    let data = board.chart_data_for(&config).unwrap();
    let east = data.points.iter().find(|p| p.label == "east").unwrap();
    assert_eq!(east.value, 100.0 + 175.0 + 300.0 + 260.0);

    // Charts pull from the filtered rows, so narrowing the filter reshapes
    // the chart on the next read
    board.set_column_filter(
        "region",
        ColumnFilter::Membership {
            values: vec![CellValue::Text("west".into())],
        },
    );
    let data = board.chart_data_for(&config).unwrap();
    assert_eq!(data.points.len(), 1);
    assert_eq!(data.points[0].label, "west");
}

#[test]
fn test_mock_query_results_load_like_uploads() {
    init_tracing();
    let backend = MockBackend::without_latency();
    let response = backend
        .run_query(&QueryRequest {
            query: "SELECT * FROM sales".into(),
            config: databoard::ConnectionConfig {
                host: "localhost".into(),
                database: "demo".into(),
                username: "reader".into(),
                ..Default::default()
            },
        })
        .unwrap();

    let mut board = Dashboard::new();
    board.load_table(response.into_table(), None);

    assert_eq!(board.rows().len(), 3);
    // Mock rows carry a date and numeric columns, so a time-series
    // recommendation leads
    let recs = board.recommendations();
    assert_eq!(recs[0].chart_type, ChartType::Line);
    assert_eq!(board.export_file_name(), "filtered-data-filtered.csv");
}

#[test]
fn test_clear_all_filters_restores_full_set() {
    let mut board = upload_sales();
    board.set_search_query("east");
    board.set_column_filter(
        "units",
        ColumnFilter::Range {
            min: Some(20.0),
            max: None,
        },
    );
    board.set_current_page(2);
    assert!(board.filtered_rows().len() < 8);

    board.clear_all_filters();
    assert_eq!(board.filtered_rows().len(), 8);
    assert_eq!(board.query().current_page, 1);
}

#[test]
fn test_numeric_summaries_follow_filters() {
    let mut board = upload_sales();
    let all = board.numeric_summaries();
    let revenue = all.iter().find(|s| s.name == "revenue").unwrap();
    assert_eq!(revenue.count, 8);
    assert_eq!(revenue.sum, 1505.0);

    board.set_column_filter(
        "region",
        ColumnFilter::Membership {
            values: vec![CellValue::Text("south".into())],
        },
    );
    let filtered = board.numeric_summaries();
    let revenue = filtered.iter().find(|s| s.name == "revenue").unwrap();
    assert_eq!(revenue.count, 2);
    assert_eq!(revenue.sum, 210.0);
    assert_eq!(revenue.min, 90.0);
    assert_eq!(revenue.max, 120.0);
}
