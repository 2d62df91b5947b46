//! databoard: an in-memory analytics dashboard core.
//!
//! Ingests tabular data (CSV/Excel bytes or a mocked database query), infers
//! column types, and derives filtered, sorted, paginated views plus chart
//! recommendations from a single state container. All processing is
//! single-session, in-memory, and synchronous apart from the mock backend's
//! simulated latency.
//!
//! The typical flow:
//!
//! 1. [`data::parse_bytes`] turns uploaded bytes into a [`types::Table`].
//! 2. [`state::Dashboard::load_table`] makes it the current snapshot.
//! 3. Selectors like [`state::Dashboard::page`] and
//!    [`state::Dashboard::recommendations`] derive views on demand; nothing
//!    is cached across state changes.

pub mod backend;
pub mod constants;
pub mod data;
pub mod query;
pub mod state;
pub mod types;

pub use backend::{BackendError, ConnectionConfig, MockBackend, QueryRequest};
pub use data::{DataError, DataResult, FileFormat, Recommendation};
pub use query::{QueryPage, QueryState};
pub use state::{Dashboard, NumericSummary};
pub use types::{
    CellValue, ChartConfig, ChartType, ColumnFilter, ColumnMeta, ColumnType, Row, SortDirection,
    Table,
};
