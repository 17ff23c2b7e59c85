//! Fallback store used when no credentials are configured
//!
//! The process keeps serving: reads come back empty (a single-row read sees
//! no row, so it reports not-found), while all writes fail with
//! `StoreError::Configuration` carrying the reason the real store could not
//! be built.

use async_trait::async_trait;
use tracing::debug;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};

use crate::error::StoreError;
use crate::query::{Filter, Row, Select};
use crate::store::{StoreBackend, TableStore};

#[derive(Debug, Clone)]
pub struct UnconfiguredStore {
    reason: String,
}

impl UnconfiguredStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the real store is unavailable
    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn refuse(&self) -> StoreError {
        StoreError::Configuration(self.reason.clone())
    }
}

impl DomainPort for UnconfiguredStore {}

#[async_trait]
impl HealthCheckable for UnconfiguredStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new("unconfigured-store", AdapterHealth::Degraded, 0)
            .with_message(self.reason.clone())
    }
}

#[async_trait]
impl TableStore for UnconfiguredStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Unconfigured
    }

    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        debug!(table = %query.table, "Store not configured, returning no rows");
        Ok(Vec::new())
    }

    async fn insert(&self, _table: &str, _row: Row) -> Result<Row, StoreError> {
        Err(self.refuse())
    }

    async fn update(
        &self,
        _table: &str,
        _filters: &[Filter],
        _patch: Row,
    ) -> Result<Row, StoreError> {
        Err(self.refuse())
    }

    async fn upsert(&self, _table: &str, _row: Row, _on_conflict: &str) -> Result<Row, StoreError> {
        Err(self.refuse())
    }
}
