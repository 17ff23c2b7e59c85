//! The `TableStore` port
//!
//! Repositories depend only on this trait. The provider decides at runtime
//! whether the trait object behind a handle is the hosted REST store, the
//! in-memory store, or the unconfigured fallback.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use core_kernel::{DomainPort, HealthCheckable};

use crate::error::StoreError;
use crate::query::{Filter, Row, Select};

/// Which adapter sits behind a store handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Postgrest,
    Memory,
    Unconfigured,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgrest => "postgrest",
            StoreBackend::Memory => "memory",
            StoreBackend::Unconfigured => "unconfigured",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table-level access to the remote store
///
/// Writes return the row as stored, including server-assigned `id` and
/// `created_at`.
#[async_trait]
pub trait TableStore: DomainPort + HealthCheckable + fmt::Debug {
    /// Identifies the adapter
    fn backend(&self) -> StoreBackend;

    /// Rows matching the query, in the requested order
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError>;

    /// Exactly one matching row
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing matches, `MultipleRows` when more than one does
    async fn select_single(&self, query: &Select) -> Result<Row, StoreError> {
        let rows = self.select(query).await?;
        exactly_one(rows, &query.table)
    }

    /// Inserts one row
    async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError>;

    /// Merges `patch` into the single row matching `filters`
    async fn update(&self, table: &str, filters: &[Filter], patch: Row)
        -> Result<Row, StoreError>;

    /// Inserts `row`, or merges it into the row sharing its `on_conflict` value
    async fn upsert(&self, table: &str, row: Row, on_conflict: &str) -> Result<Row, StoreError>;
}

/// Reduces a result set to its only row
pub(crate) fn exactly_one(mut rows: Vec<Row>, table: &str) -> Result<Row, StoreError> {
    match rows.len() {
        0 => Err(StoreError::NotFound(format!(
            "no row in {} matched the query",
            table
        ))),
        1 => Ok(rows.remove(0)),
        n => Err(StoreError::MultipleRows(n)),
    }
}
