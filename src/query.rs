//! The query pipeline: search → column filters → sort → paginate.
//!
//! Every stage is a pure function of the raw rows and the current query
//! state; nothing is cached or mutated, so recomputing on each read is the
//! contract. Stages degrade gracefully: a failed numeric coercion excludes
//! the row rather than erroring.

use crate::constants::DEFAULT_ROWS_PER_PAGE;
use crate::types::{CellValue, ColumnFilter, Row, SortDirection};
use std::cmp::Ordering;
use std::collections::HashMap;

/// The caller-controlled inputs of the pipeline
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState {
    /// Case-insensitive substring match across all columns; empty = no search
    pub search_query: String,
    /// Active per-column filters, ANDed across columns
    pub filters: HashMap<String, ColumnFilter>,
    /// Sort column; `None` preserves insertion order
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    /// 1-based page index. The pipeline does not clamp out-of-range pages;
    /// they yield an empty slice.
    pub current_page: usize,
    pub rows_per_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            filters: HashMap::new(),
            sort_field: None,
            sort_direction: SortDirection::Ascending,
            current_page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

/// One page of pipeline output
#[derive(Clone, Debug)]
pub struct QueryPage<'a> {
    pub rows: Vec<&'a Row>,
    pub total_pages: usize,
}

/// Run the full pipeline in its fixed order and slice out the current page
pub fn run<'a>(rows: &'a [Row], state: &QueryState) -> QueryPage<'a> {
    let filtered = filter_rows(search_rows(rows, &state.search_query), &state.filters);
    let total_pages = total_pages(filtered.len(), state.rows_per_page);
    let sorted = sort_rows(filtered, state.sort_field.as_deref(), state.sort_direction);
    let rows = paginate(&sorted, state.current_page, state.rows_per_page);
    QueryPage { rows, total_pages }
}

/// Filtered and sorted rows without pagination (export pulls from here)
pub fn filtered_sorted<'a>(rows: &'a [Row], state: &QueryState) -> Vec<&'a Row> {
    let filtered = filter_rows(search_rows(rows, &state.search_query), &state.filters);
    sort_rows(filtered, state.sort_field.as_deref(), state.sort_direction)
}

/// Keep rows where any stringified value contains the case-folded query.
/// An empty query keeps everything.
pub fn search_rows<'a>(rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    if query.is_empty() {
        return rows.iter().collect();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.values()
                .any(|value| value.to_display_string().to_lowercase().contains(&needle))
        })
        .collect()
}

/// Apply every active column filter; a row must satisfy all of them.
///
/// A membership filter with an empty value set is treated as absent, which
/// distinguishes "filter cleared" from "filter matches nothing".
pub fn filter_rows<'a>(
    rows: Vec<&'a Row>,
    filters: &HashMap<String, ColumnFilter>,
) -> Vec<&'a Row> {
    if filters.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            filters
                .iter()
                .all(|(column, filter)| row_matches(row, column, filter))
        })
        .collect()
}

fn row_matches(row: &Row, column: &str, filter: &ColumnFilter) -> bool {
    if filter.is_noop() {
        return true;
    }
    let value = row.get(column).unwrap_or(&CellValue::Null);
    match filter {
        ColumnFilter::Range { min, max } => {
            // Strict contract: a cell that fails numeric coercion is
            // excluded regardless of the bounds.
            let Some(n) = value.as_number() else {
                return false;
            };
            if min.is_some_and(|min| n < min) {
                return false;
            }
            !max.is_some_and(|max| n > max)
        }
        ColumnFilter::Membership { values } => values.contains(value),
    }
}

/// Stable sort by the given field.
///
/// Null and missing values sort to the end regardless of direction; this is
/// an explicit tie-break, not a symmetric comparator, and is preserved
/// exactly. Same-typed strings compare case-insensitively, same-typed
/// numbers numerically, and mixed-type pairs compare equal.
pub fn sort_rows<'a>(
    mut rows: Vec<&'a Row>,
    field: Option<&str>,
    direction: SortDirection,
) -> Vec<&'a Row> {
    let Some(field) = field else {
        return rows;
    };
    merge_sort_by(&mut rows, &|a: &&Row, b: &&Row| {
        let a_val = a.get(field).filter(|v| !matches!(v, CellValue::Null));
        let b_val = b.get(field).filter(|v| !matches!(v, CellValue::Null));
        match (a_val, b_val) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ordering = match (a, b) {
                    (CellValue::Text(a), CellValue::Text(b)) => {
                        a.to_lowercase().cmp(&b.to_lowercase())
                    }
                    (CellValue::Number(a), CellValue::Number(b)) => {
                        a.partial_cmp(b).unwrap_or(Ordering::Equal)
                    }
                    _ => Ordering::Equal,
                };
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    });
    rows
}

/// Stable merge sort for a comparator without a total order.
///
/// The field comparator above is intransitive once a column mixes numbers
/// and text (mixed-type pairs compare equal while same-type pairs order),
/// and `slice::sort_by` panics at runtime on such comparators. A plain
/// merge never inspects more than one pair at a time; ties and
/// incomparable pairs keep their relative order.
fn merge_sort_by<T: Copy, F: Fn(&T, &T) -> Ordering>(items: &mut [T], cmp: &F) {
    let len = items.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort_by(&mut items[..mid], cmp);
    merge_sort_by(&mut items[mid..], cmp);

    let mut merged = Vec::with_capacity(len);
    {
        let (left, right) = items.split_at(mid);
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            // Take from the right run only on strict Less, for stability
            if cmp(&right[j], &left[i]) == Ordering::Less {
                merged.push(right[j]);
                j += 1;
            } else {
                merged.push(left[i]);
                i += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }
    items.copy_from_slice(&merged);
}

/// Slice the current page out of the filtered/sorted sequence.
///
/// Pages are 1-based; a page beyond the end yields an empty slice.
pub fn paginate<'a>(rows: &[&'a Row], current_page: usize, rows_per_page: usize) -> Vec<&'a Row> {
    let start = current_page.saturating_sub(1).saturating_mul(rows_per_page);
    if start >= rows.len() {
        return Vec::new();
    }
    let end = (start + rows_per_page).min(rows.len());
    rows[start..end].to_vec()
}

/// Total page count for a filtered row count; never below 1
pub fn total_pages(filtered_count: usize, rows_per_page: usize) -> usize {
    let rows_per_page = rows_per_page.max(1);
    filtered_count.div_ceil(rows_per_page).max(1)
}
