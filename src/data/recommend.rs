//! Chart recommendation engine.
//!
//! Proposes ranked chart configurations from column metadata alone; data
//! values are never consulted. Every rule is generated independently, then
//! the results are stable-sorted by descending confidence and capped.

use crate::constants::{
    BAR_MAX_CATEGORIES, DOUGHNUT_MAX_CATEGORIES, MAX_RECOMMENDATIONS, MIN_CHART_CATEGORIES,
};
use crate::types::{ChartConfig, ChartType, ColumnMeta, ColumnType};

/// A scored, justified chart suggestion
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: String,
    pub title: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Human-readable justification
    pub reason: String,
}

impl Recommendation {
    /// Accept this recommendation as a chart configuration with a fresh id
    pub fn into_config(self) -> ChartConfig {
        ChartConfig::new(self.chart_type, &self.x_axis, &self.y_axis, &self.title)
    }
}

/// Recommend up to five charts for the given column set, highest confidence
/// first. No numeric column means no recommendations.
pub fn recommend(columns: &[ColumnMeta]) -> Vec<Recommendation> {
    let numeric: Vec<&ColumnMeta> = columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Numeric)
        .collect();
    let categorical: Vec<&ColumnMeta> = columns
        .iter()
        .filter(|c| matches!(c.column_type, ColumnType::Categorical | ColumnType::Text))
        .collect();
    let dates: Vec<&ColumnMeta> = columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Date)
        .collect();

    let mut recommendations = Vec::new();

    // Time series: every numeric column against the first date column
    if let Some(date_col) = dates.first() {
        for num_col in &numeric {
            recommendations.push(Recommendation {
                chart_type: ChartType::Line,
                x_axis: date_col.name.clone(),
                y_axis: num_col.name.clone(),
                title: format!("{} Over Time", num_col.name),
                confidence: 0.95,
                reason: "Date column detected - line chart ideal for time series".to_string(),
            });
        }
    }

    // Categorical vs numeric: bar charts for manageable category counts
    for cat_col in categorical.iter().take(2) {
        for num_col in numeric.iter().take(2) {
            let unique_count = cat_col.unique_values.as_ref().map_or(0, |v| v.len());
            if unique_count >= MIN_CHART_CATEGORIES && unique_count <= BAR_MAX_CATEGORIES {
                recommendations.push(Recommendation {
                    chart_type: ChartType::Bar,
                    x_axis: cat_col.name.clone(),
                    y_axis: num_col.name.clone(),
                    title: format!("{} by {}", num_col.name, cat_col.name),
                    confidence: 0.85,
                    reason: format!(
                        "Categorical data with {unique_count} categories - bar chart recommended"
                    ),
                });
            }
        }
    }

    // Composition: one doughnut when the first categorical column is small
    if let (Some(cat_col), Some(num_col)) = (categorical.first(), numeric.first()) {
        let unique_count = cat_col.unique_values.as_ref().map_or(0, |v| v.len());
        if unique_count >= MIN_CHART_CATEGORIES && unique_count <= DOUGHNUT_MAX_CATEGORIES {
            recommendations.push(Recommendation {
                chart_type: ChartType::Doughnut,
                x_axis: cat_col.name.clone(),
                y_axis: num_col.name.clone(),
                title: format!("{} Distribution by {}", num_col.name, cat_col.name),
                confidence: 0.75,
                reason: format!("Good for showing proportions with {unique_count} categories"),
            });
        }
    }

    // Stable sort keeps generation order within equal confidence
    recommendations.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
