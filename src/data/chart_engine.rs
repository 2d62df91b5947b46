//! Chart data processing engine
//!
//! Turns filtered rows plus a chart configuration into render-ready points:
//! grouping by the x-axis value, summing the y-axis values, and computing
//! the min/max needed for scaling.

use crate::types::{ChartConfig, Row};
use std::collections::HashMap;

/// Processed chart data ready for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    /// Data points in first-appearance group order
    pub points: Vec<ChartPoint>,
    /// X-axis column name
    pub x_label: String,
    /// Y-axis column name
    pub y_label: String,
    /// Maximum value for scaling
    pub max_value: f64,
    /// Minimum value for scaling
    pub min_value: f64,
}

/// A single data point in a chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    /// Label for this point (x-axis group)
    pub label: String,
    /// Aggregated value (y-axis)
    pub value: f64,
    /// Color for this point/series
    pub color: &'static str,
}

/// Chart color palette (rgba), cycled per point
pub const CHART_COLORS: [&str; 5] = [
    "rgba(99, 102, 241, 0.8)",
    "rgba(34, 197, 94, 0.8)",
    "rgba(251, 191, 36, 0.8)",
    "rgba(239, 68, 68, 0.8)",
    "rgba(168, 85, 247, 0.8)",
];

/// Group rows by the x-axis value and sum the y-axis values per group.
///
/// Rows missing the x-axis column group under "Unknown"; y values that fail
/// numeric coercion contribute 0. Group order is first appearance. Returns
/// `None` when there are no rows to chart.
pub fn chart_data(rows: &[Row], config: &ChartConfig) -> Option<ChartData> {
    let mut group_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, f64> = HashMap::new();

    for row in rows {
        let label = match row.get(&config.x_axis) {
            Some(value) if !value.is_null() => value.to_display_string(),
            _ => "Unknown".to_string(),
        };
        let value = row
            .get(&config.y_axis)
            .and_then(|v| v.as_number())
            .unwrap_or(0.0);
        if !groups.contains_key(&label) {
            group_order.push(label.clone());
        }
        *groups.entry(label).or_insert(0.0) += value;
    }

    if group_order.is_empty() {
        return None;
    }

    let mut max_value = f64::NEG_INFINITY;
    let mut min_value = f64::INFINITY;
    let points: Vec<ChartPoint> = group_order
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let value = groups[&label];
            max_value = max_value.max(value);
            min_value = min_value.min(value);
            ChartPoint {
                label,
                value,
                color: CHART_COLORS[i % CHART_COLORS.len()],
            }
        })
        .collect();

    Some(ChartData {
        points,
        x_label: config.x_axis.clone(),
        y_label: config.y_axis.clone(),
        max_value,
        min_value,
    })
}
