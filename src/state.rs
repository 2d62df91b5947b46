//! Dashboard state container.
//!
//! `Dashboard` owns the single source of truth (raw rows, columns, query
//! state, charts) and exposes everything else as pure derivations over the
//! current snapshot. Mutators mirror the actions a dashboard UI dispatches;
//! selectors recompute on every call, so there is no cache to invalidate.

use crate::data::{
    self, ChartData, DataResult, Recommendation, chart_data, export_file_name, recommend, to_csv,
};
use crate::query::{self, QueryPage, QueryState};
use crate::types::{ChartConfig, ColumnFilter, ColumnMeta, Row, SortDirection, Table};

/// Per-column aggregates over the filtered rows
#[derive(Clone, Debug, PartialEq)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// The dashboard's single source of truth
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    rows: Vec<Row>,
    columns: Vec<ColumnMeta>,
    query: QueryState,
    charts: Vec<ChartConfig>,
    file_name: Option<String>,
    /// Bumped on every upload start; stale completions are discarded
    upload_generation: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    /// Replace the table wholesale. Filters, search, pagination, and charts
    /// reset so nothing references columns that no longer exist.
    pub fn load_table(&mut self, table: Table, file_name: Option<String>) {
        tracing::info!(
            rows = table.rows.len(),
            columns = table.columns.len(),
            file = file_name.as_deref().unwrap_or("<query>"),
            "Loading table"
        );
        self.rows = table.rows;
        self.columns = table.columns;
        self.file_name = file_name;
        self.charts.clear();
        self.query = QueryState {
            rows_per_page: self.query.rows_per_page,
            ..QueryState::default()
        };
    }

    /// Start an upload and get its generation token.
    ///
    /// Only one upload is expected in flight at a time; if a second one
    /// starts anyway, the token lets [`Dashboard::complete_upload`] discard
    /// the first upload's late completion instead of racing.
    pub fn begin_upload(&mut self) -> u64 {
        self.upload_generation += 1;
        self.upload_generation
    }

    /// Apply an upload's result if its token is still current. Returns
    /// whether the table was applied.
    pub fn complete_upload(&mut self, token: u64, table: Table, file_name: Option<String>) -> bool {
        if token != self.upload_generation {
            tracing::warn!(token, current = self.upload_generation, "Discarding stale upload");
            return false;
        }
        self.load_table(table, file_name);
        true
    }

    /// Drop the table and everything derived from it
    pub fn clear_data(&mut self) {
        tracing::info!("Clearing dashboard data");
        self.rows.clear();
        self.columns.clear();
        self.charts.clear();
        self.file_name = None;
        self.query = QueryState {
            rows_per_page: self.query.rows_per_page,
            ..QueryState::default()
        };
    }

    // ========================================================================
    // Query Actions
    // ========================================================================

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query.search_query = query.into();
        self.query.current_page = 1;
    }

    pub fn set_sort_field(&mut self, field: impl Into<String>) {
        self.query.sort_field = Some(field.into());
    }

    pub fn clear_sort(&mut self) {
        self.query.sort_field = None;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.query.sort_direction = direction;
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.query.current_page = page;
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.query.rows_per_page = rows_per_page;
        self.query.current_page = 1;
    }

    /// Set a column's filter, replacing any previous filter wholesale
    pub fn set_column_filter(&mut self, column: impl Into<String>, filter: ColumnFilter) {
        self.query.filters.insert(column.into(), filter);
        self.query.current_page = 1;
    }

    pub fn clear_column_filter(&mut self, column: &str) {
        self.query.filters.remove(column);
    }

    pub fn clear_all_filters(&mut self) {
        self.query.filters.clear();
        self.query.search_query.clear();
        self.query.current_page = 1;
    }

    // ========================================================================
    // Chart Actions
    // ========================================================================

    pub fn add_chart(&mut self, chart: ChartConfig) {
        self.charts.push(chart);
    }

    /// Replace the chart with the same id, if present
    pub fn update_chart(&mut self, chart: ChartConfig) {
        if let Some(existing) = self.charts.iter_mut().find(|c| c.id == chart.id) {
            *existing = chart;
        }
    }

    pub fn remove_chart(&mut self, id: &str) {
        self.charts.retain(|c| c.id != id);
    }

    // ========================================================================
    // Selectors
    // ========================================================================

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn charts(&self) -> &[ChartConfig] {
        &self.charts
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Rows surviving search and column filters, in insertion order
    pub fn filtered_rows(&self) -> Vec<&Row> {
        query::filter_rows(
            query::search_rows(&self.rows, &self.query.search_query),
            &self.query.filters,
        )
    }

    /// Filtered rows in sort order (what export serializes)
    pub fn sorted_rows(&self) -> Vec<&Row> {
        query::filtered_sorted(&self.rows, &self.query)
    }

    /// The current page of the pipeline output plus the page count
    pub fn page(&self) -> QueryPage<'_> {
        query::run(&self.rows, &self.query)
    }

    pub fn total_pages(&self) -> usize {
        query::total_pages(self.filtered_rows().len(), self.query.rows_per_page)
    }

    /// Ranked chart recommendations for the current column set
    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommend(&self.columns)
    }

    /// Render-ready data for one chart, derived from the filtered rows
    pub fn chart_data_for(&self, chart: &ChartConfig) -> Option<ChartData> {
        let filtered: Vec<Row> = self.filtered_rows().into_iter().cloned().collect();
        chart_data(&filtered, chart)
    }

    /// Aggregates for every numeric column over the filtered rows.
    ///
    /// Cells that fail numeric coercion contribute 0 rather than being
    /// skipped, so `count` always equals the filtered row count.
    pub fn numeric_summaries(&self) -> Vec<NumericSummary> {
        let filtered = self.filtered_rows();
        self.columns
            .iter()
            .filter(|c| c.column_type == crate::types::ColumnType::Numeric)
            .map(|col| {
                let values: Vec<f64> = filtered
                    .iter()
                    .map(|row| {
                        row.get(&col.name)
                            .and_then(|v| v.as_number())
                            .unwrap_or(0.0)
                    })
                    .collect();
                let count = values.len();
                let sum: f64 = values.iter().sum();
                let mean = if count > 0 { sum / count as f64 } else { 0.0 };
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                NumericSummary {
                    name: col.name.clone(),
                    count,
                    sum,
                    mean,
                    min: if count > 0 { min } else { 0.0 },
                    max: if count > 0 { max } else { 0.0 },
                }
            })
            .collect()
    }

    /// Serialize the filtered/sorted rows as CSV
    pub fn export_csv(&self) -> DataResult<String> {
        let rows: Vec<Row> = self.sorted_rows().into_iter().cloned().collect();
        to_csv(&rows)
    }

    /// Download name for the exported CSV
    pub fn export_file_name(&self) -> String {
        export_file_name(self.file_name.as_deref())
    }

    /// Parse uploaded bytes and load the result in one step
    pub fn upload_bytes(
        &mut self,
        bytes: &[u8],
        format: data::FileFormat,
        file_name: impl Into<String>,
    ) -> DataResult<()> {
        let table = data::parse_bytes(bytes, format)?;
        self.load_table(table, Some(file_name.into()));
        Ok(())
    }
}
