//! Crate-wide constants.
//!
//! Centralizes thresholds and defaults so classification and paging behavior
//! is documented in one place.

// ============================================================================
// Type Inference Thresholds
// ============================================================================

/// Fraction of non-null values that must coerce to a finite number for a
/// column to classify as numeric
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.8;

/// Fraction of non-null values that must parse as a calendar date for a
/// column to classify as date
pub const DATE_RATIO_THRESHOLD: f64 = 0.8;

/// A categorical column's distinct values must stay below this fraction of
/// the non-null count
pub const CATEGORICAL_DISTINCT_RATIO: f64 = 0.5;

/// Hard cap on distinct values for a categorical column; keeps filter UIs
/// and pie legends usable
pub const CATEGORICAL_MAX_UNIQUE: usize = 20;

// ============================================================================
// Chart Recommendations
// ============================================================================

/// Maximum number of recommendations returned per column set
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Minimum category count for bar and doughnut recommendations
pub const MIN_CHART_CATEGORIES: usize = 2;

/// Maximum category count for a bar chart recommendation
pub const BAR_MAX_CATEGORIES: usize = 20;

/// Maximum category count for a doughnut recommendation
pub const DOUGHNUT_MAX_CATEGORIES: usize = 8;

// ============================================================================
// Pagination Defaults
// ============================================================================

/// Rows shown per page until the caller chooses otherwise
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

// ============================================================================
// Mock Backend Latency
// ============================================================================

/// Simulated latency for the connection-test endpoint, in milliseconds
pub const MOCK_CONNECTION_LATENCY_MS: u64 = 1000;

/// Simulated latency for the query endpoint, in milliseconds
pub const MOCK_QUERY_LATENCY_MS: u64 = 1500;
