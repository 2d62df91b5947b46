//! Property-style tests for the query pipeline.

use crate::helpers::{TestTableBuilder, init_tracing};
use databoard::query::{self, QueryState};
use databoard::{CellValue, ColumnFilter, Row, SortDirection};
use std::collections::HashMap;

fn numbered_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::new()
                .with("n", i as f64)
                .with("bucket", if i % 2 == 0 { "even" } else { "odd" })
        })
        .collect()
}

#[test]
fn test_concatenating_all_pages_reproduces_the_sequence() {
    init_tracing();
    let rows = numbered_rows(25);
    for rows_per_page in [1, 3, 7, 10, 25, 40] {
        let mut state = QueryState {
            rows_per_page,
            sort_field: Some("n".to_string()),
            sort_direction: SortDirection::Descending,
            ..Default::default()
        };
        let expected = query::filtered_sorted(&rows, &state);

        let total = query::total_pages(expected.len(), rows_per_page);
        let mut collected: Vec<&Row> = Vec::new();
        for page in 1..=total {
            state.current_page = page;
            collected.extend(query::run(&rows, &state).rows);
        }
        assert_eq!(collected, expected, "rows_per_page = {rows_per_page}");
    }
}

#[test]
fn test_range_filter_survivors_always_lie_in_bounds() {
    let mut rows = numbered_rows(20);
    rows.push(Row::new().with("n", "not numeric").with("bucket", "odd"));
    rows.push(Row::new().with("n", CellValue::Null).with("bucket", "even"));

    let (min, max) = (5.0, 12.0);
    let filters = HashMap::from([(
        "n".to_string(),
        ColumnFilter::Range {
            min: Some(min),
            max: Some(max),
        },
    )]);
    let survivors = query::filter_rows(rows.iter().collect(), &filters);

    assert_eq!(survivors.len(), 8);
    for row in survivors {
        let n = row
            .get("n")
            .and_then(|v| v.as_number())
            .expect("rows failing coercion never survive");
        assert!((min..=max).contains(&n));
    }
}

#[test]
fn test_half_open_range_bounds() {
    let rows = numbered_rows(10);
    let only_min = HashMap::from([(
        "n".to_string(),
        ColumnFilter::Range {
            min: Some(7.0),
            max: None,
        },
    )]);
    assert_eq!(query::filter_rows(rows.iter().collect(), &only_min).len(), 3);

    let only_max = HashMap::from([(
        "n".to_string(),
        ColumnFilter::Range {
            min: None,
            max: Some(2.0),
        },
    )]);
    assert_eq!(query::filter_rows(rows.iter().collect(), &only_max).len(), 3);
}

#[test]
fn test_filters_and_across_columns() {
    let rows = numbered_rows(10);
    let filters = HashMap::from([
        (
            "bucket".to_string(),
            ColumnFilter::Membership {
                values: vec![CellValue::Text("even".into())],
            },
        ),
        (
            "n".to_string(),
            ColumnFilter::Range {
                min: Some(4.0),
                max: None,
            },
        ),
    ]);
    let survivors = query::filter_rows(rows.iter().collect(), &filters);
    // evens >= 4: 4, 6, 8
    assert_eq!(survivors.len(), 3);
}

#[test]
fn test_search_applies_before_column_filters() {
    let table = TestTableBuilder::new()
        .with_row(&[("name", "Alpha".into()), ("score", 10.0.into())])
        .with_row(&[("name", "Beta".into()), ("score", 20.0.into())])
        .with_row(&[("name", "Alphabet".into()), ("score", 30.0.into())])
        .build();
    let state = QueryState {
        search_query: "alpha".to_string(),
        filters: HashMap::from([(
            "score".to_string(),
            ColumnFilter::Range {
                min: Some(15.0),
                max: None,
            },
        )]),
        ..Default::default()
    };
    let page = query::run(&table.rows, &state);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(
        page.rows[0].get("name"),
        Some(&CellValue::Text("Alphabet".into()))
    );
    assert_eq!(page.total_pages, 1);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let rows = vec![
        Row::new().with("k", "b").with("ord", 1.0),
        Row::new().with("k", "a").with("ord", 2.0),
        Row::new().with("k", "b").with("ord", 3.0),
        Row::new().with("k", "a").with("ord", 4.0),
    ];
    let sorted = query::sort_rows(rows.iter().collect(), Some("k"), SortDirection::Ascending);
    let order: Vec<f64> = sorted
        .iter()
        .map(|r| r.get("ord").unwrap().as_number().unwrap())
        .collect();
    assert_eq!(order, vec![2.0, 4.0, 1.0, 3.0]);
}

#[test]
fn test_string_sort_is_case_folded() {
    let rows = vec![
        Row::new().with("k", "banana"),
        Row::new().with("k", "Apple"),
        Row::new().with("k", "cherry"),
    ];
    let sorted = query::sort_rows(rows.iter().collect(), Some("k"), SortDirection::Ascending);
    assert_eq!(sorted[0].get("k"), Some(&CellValue::Text("Apple".into())));
}

#[test]
fn test_pipeline_does_not_clamp_pages() {
    let rows = numbered_rows(5);
    let state = QueryState {
        current_page: 99,
        ..Default::default()
    };
    let page = query::run(&rows, &state);
    assert!(page.rows.is_empty());
    assert_eq!(page.total_pages, 1);
}
