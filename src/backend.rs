//! Mock database backend.
//!
//! Non-authoritative stand-ins for a driver layer: the connection test
//! validates its parameters and always succeeds after a fixed delay; the
//! query endpoint ignores the query text and returns a fixed row set. A real
//! integration would replace this module without touching the query
//! pipeline contract.

use crate::constants::{MOCK_CONNECTION_LATENCY_MS, MOCK_QUERY_LATENCY_MS};
use crate::data::build_columns;
use crate::types::{Row, Table};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from the mock endpoints. Always recoverable; a retry is simply a
/// fresh call.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BackendError {
    #[error("Missing required connection parameters")]
    MissingConnectionParameters,

    #[error("Query is required")]
    MissingQuery,
}

/// Connection parameters as a dashboard's connection form submits them
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl ConnectionConfig {
    /// host, database, and username are all required
    fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.database.is_empty() && !self.username.is_empty()
    }
}

/// Successful connection-test response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub message: String,
}

/// A query plus the connection it would run against
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(flatten)]
    pub config: ConnectionConfig,
}

/// Rows returned by the query endpoint
#[derive(Clone, Debug, Serialize)]
pub struct QueryResponse {
    pub rows: Vec<Row>,
    pub row_count: usize,
}

impl QueryResponse {
    /// Run type inference over the result rows so they can be loaded like
    /// an upload
    pub fn into_table(self) -> Table {
        let headers: Vec<String> = self
            .rows
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default();
        let columns = build_columns(&self.rows, &headers);
        Table {
            rows: self.rows,
            columns,
        }
    }
}

/// The mock endpoints with configurable simulated latency
#[derive(Clone, Debug)]
pub struct MockBackend {
    connection_latency: Duration,
    query_latency: Duration,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            connection_latency: Duration::from_millis(MOCK_CONNECTION_LATENCY_MS),
            query_latency: Duration::from_millis(MOCK_QUERY_LATENCY_MS),
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// No simulated delay; used by tests
    pub fn without_latency() -> Self {
        Self {
            connection_latency: Duration::ZERO,
            query_latency: Duration::ZERO,
        }
    }

    /// Validate the connection parameters and report success.
    ///
    /// No real connectivity is attempted; any complete-looking
    /// configuration succeeds after the simulated delay.
    pub fn test_connection(
        &self,
        config: &ConnectionConfig,
    ) -> Result<ConnectionStatus, BackendError> {
        if !config.is_complete() {
            return Err(BackendError::MissingConnectionParameters);
        }
        std::thread::sleep(self.connection_latency);
        tracing::debug!(host = %config.host, database = %config.database, "Connection test ok");
        Ok(ConnectionStatus {
            message: "Connection successful".to_string(),
        })
    }

    /// Return the fixed mock row set, regardless of query content.
    ///
    /// Only an absent (empty-string) query is rejected; whitespace passes
    /// through like any other text.
    pub fn run_query(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        if request.query.is_empty() {
            return Err(BackendError::MissingQuery);
        }
        std::thread::sleep(self.query_latency);
        let rows = mock_rows();
        tracing::debug!(rows = rows.len(), "Mock query executed");
        Ok(QueryResponse {
            row_count: rows.len(),
            rows,
        })
    }
}

/// The fixed demonstration row set
fn mock_rows() -> Vec<Row> {
    vec![
        Row::new()
            .with("id", 1.0)
            .with("name", "Product A")
            .with("sales", 12500.0)
            .with("date", "2024-01-15"),
        Row::new()
            .with("id", 2.0)
            .with("name", "Product B")
            .with("sales", 18900.0)
            .with("date", "2024-01-16"),
        Row::new()
            .with("id", 3.0)
            .with("name", "Product C")
            .with("sales", 9800.0)
            .with("date", "2024-01-17"),
    ]
}
