//! Core types for the databoard analytics engine.
//!
//! This module defines the fundamental data structures used throughout the
//! crate: cell values, rows, column metadata, filters, and chart
//! configurations.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// Cell Values
// ============================================================================

/// A single scalar value in a table cell
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Convert the cell to its display string.
    ///
    /// Whole numbers render without a fractional part so that `100.0`
    /// displays (and exports) as `100`.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            CellValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            CellValue::Null => String::new(),
        }
    }

    /// Coerce the cell to a finite number, if possible.
    ///
    /// Booleans coerce to 1/0. Text coerces when it parses as a finite
    /// float. Null never coerces.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => n.is_finite().then_some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Null => None,
        }
    }

    /// Whether this cell counts as absent for inference and filtering
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Parse a raw string into a cell, preferring a numeric representation.
    ///
    /// The string is trimmed; an empty string becomes [`CellValue::Null`],
    /// a string that round-trips through float parsing becomes a number,
    /// anything else is stored as text.
    pub fn from_raw(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }
}

// NaN is never stored (all constructors go through finiteness checks), so
// float equality is total here.
impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            CellValue::Text(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            CellValue::Number(n) => {
                1u8.hash(state);
                // Normalize -0.0 so it hashes like 0.0
                let n = if *n == 0.0 { 0.0 } else { *n };
                n.to_bits().hash(state);
            }
            CellValue::Bool(b) => {
                2u8.hash(state);
                b.hash(state);
            }
            CellValue::Null => 3u8.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Null => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CellVisitor;

        impl<'de> Visitor<'de> for CellVisitor {
            type Value = CellValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number, boolean, or null")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<CellValue, E> {
                Ok(CellValue::Text(v.to_string()))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<CellValue, E> {
                Ok(CellValue::Text(v))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<CellValue, E> {
                Ok(CellValue::Number(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<CellValue, E> {
                Ok(CellValue::Number(v as f64))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<CellValue, E> {
                Ok(CellValue::Number(v as f64))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<CellValue, E> {
                Ok(CellValue::Bool(v))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<CellValue, E> {
                Ok(CellValue::Null)
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<CellValue, E> {
                Ok(CellValue::Null)
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One record of a table: an ordered mapping of column name to cell value.
///
/// Key order is preserved per row because CSV export derives its header from
/// the first row's key order rather than from the global schema.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Set a field, replacing any existing value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Builder-style [`Row::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.set(name, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column name to scalar value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::new();
                while let Some((name, value)) = access.next_entry::<String, CellValue>()? {
                    row.set(name, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

// ============================================================================
// Columns
// ============================================================================

/// Inferred type of a column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Date,
    #[default]
    Text,
}

impl ColumnType {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "Numeric",
            ColumnType::Categorical => "Categorical",
            ColumnType::Date => "Date",
            ColumnType::Text => "Text",
        }
    }
}

/// Column metadata: inferred type plus, for categorical columns, the
/// distinct value set in first-appearance order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub column_type: ColumnType,
    /// Populated only when `column_type` is [`ColumnType::Categorical`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_values: Option<Vec<CellValue>>,
}

impl ColumnMeta {
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            unique_values: None,
        }
    }
}

/// A parsed table: rows plus the column metadata inferred from them
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnMeta>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// ============================================================================
// Filters & Sorting
// ============================================================================

/// A per-column filter.
///
/// At most one filter is active per column; setting a new filter replaces
/// the previous one wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFilter {
    /// Keep rows whose cell coerces to a number within `[min, max]`.
    /// Rows whose cell fails numeric coercion are excluded outright.
    Range { min: Option<f64>, max: Option<f64> },
    /// Keep rows whose cell equals one of the given values. An empty value
    /// set means the filter is absent, not that it matches nothing.
    Membership { values: Vec<CellValue> },
}

impl ColumnFilter {
    /// Whether this filter excludes nothing
    pub fn is_noop(&self) -> bool {
        match self {
            ColumnFilter::Range { min, max } => min.is_none() && max.is_none(),
            ColumnFilter::Membership { values } => values.is_empty(),
        }
    }
}

/// Sort direction for the query pipeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }
}

// ============================================================================
// Chart Types
// ============================================================================

/// Types of charts available
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Area,
    Pie,
    Doughnut,
}

impl ChartType {
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::Line => "Line",
            ChartType::Area => "Area",
            ChartType::Pie => "Pie",
            ChartType::Doughnut => "Doughnut",
        }
    }

    pub fn all() -> &'static [ChartType] {
        &[
            ChartType::Bar,
            ChartType::Line,
            ChartType::Area,
            ChartType::Pie,
            ChartType::Doughnut,
        ]
    }
}

/// A user-created chart over the current filtered rows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Unique identifier (uuid v4)
    pub id: String,
    pub chart_type: ChartType,
    /// Column providing labels
    pub x_axis: String,
    /// Column providing values
    pub y_axis: String,
    pub title: String,
}

impl ChartConfig {
    pub fn new(chart_type: ChartType, x_axis: &str, y_axis: &str, title: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chart_type,
            x_axis: x_axis.to_string(),
            y_axis: y_axis.to_string(),
            title: title.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
