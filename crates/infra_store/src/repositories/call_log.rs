//! Call log repository (append-only)

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::CallLogId;
use domain_crm::{CallLog, NewCallLog};

use super::{from_row, from_rows, id_filter, to_row, CALL_LOGS_TABLE};
use crate::error::StoreError;
use crate::provider::StoreHandle;
use crate::query::{OrderBy, Select};
use crate::store::TableStore;

#[derive(Debug, Clone)]
pub struct CallLogRepository {
    store: Arc<dyn TableStore>,
}

impl CallLogRepository {
    pub fn new(handle: &StoreHandle) -> Self {
        Self::from_store(handle.store())
    }

    pub fn from_store(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: NewCallLog) -> Result<CallLog, StoreError> {
        let insert = request.prepare()?;
        let row = self.store.insert(CALL_LOGS_TABLE, to_row(&insert)?).await?;
        let log: CallLog = from_row(row)?;
        debug!(call_log_id = %log.id, "Call log recorded");
        Ok(log)
    }

    /// Every call log, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CallLog>, StoreError> {
        let query = Select::from(CALL_LOGS_TABLE)
            .order(OrderBy::desc("created_at"))
            .order(OrderBy::desc("id"));
        from_rows(self.store.select(&query).await?)
    }

    #[instrument(skip(self), fields(call_log_id = %id))]
    pub async fn get_by_id(&self, id: CallLogId) -> Result<CallLog, StoreError> {
        let query = Select::from(CALL_LOGS_TABLE).filter(id_filter(*id.as_uuid()));
        from_row(self.store.select_single(&query).await?)
    }
}
