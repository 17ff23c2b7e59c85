//! Lead repository
//!
//! Leads are listed newest first, with the id as tie-breaker so rows sharing
//! a creation timestamp still come back in a stable order.

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::LeadId;
use domain_crm::{Lead, LeadStatus, LeadUpdate, NewLead};

use super::{from_row, from_rows, id_filter, to_row, Stamped, LEADS_TABLE};
use crate::error::StoreError;
use crate::provider::StoreHandle;
use crate::query::{OrderBy, Select};
use crate::store::TableStore;

/// Data access for `security_leads`
#[derive(Debug, Clone)]
pub struct LeadRepository {
    store: Arc<dyn TableStore>,
}

impl LeadRepository {
    /// Creates a repository over the store behind `handle`
    pub fn new(handle: &StoreHandle) -> Self {
        Self::from_store(handle.store())
    }

    pub fn from_store(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Inserts a lead after validating it and applying defaults
    ///
    /// # Errors
    ///
    /// `StoreError::Invalid` if the request fails validation (nothing is sent),
    /// otherwise whatever the store reports
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: NewLead) -> Result<Lead, StoreError> {
        let insert = request.prepare()?;
        let row = self.store.insert(LEADS_TABLE, to_row(&insert)?).await?;
        let lead: Lead = from_row(row)?;
        debug!(lead_id = %lead.id, "Lead created");
        Ok(lead)
    }

    /// All leads, optionally restricted to one status, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, StoreError> {
        let query = Select::from(LEADS_TABLE)
            .eq_opt("status", status.map(|s| s.as_str()))
            .order(OrderBy::desc("created_at"))
            .order(OrderBy::desc("id"));
        from_rows(self.store.select(&query).await?)
    }

    /// A single lead
    #[instrument(skip(self), fields(lead_id = %id))]
    pub async fn get_by_id(&self, id: LeadId) -> Result<Lead, StoreError> {
        let query = Select::from(LEADS_TABLE).filter(id_filter(*id.as_uuid()));
        from_row(self.store.select_single(&query).await?)
    }

    /// Applies the supplied fields and stamps `updated_at`
    #[instrument(skip(self, update), fields(lead_id = %id))]
    pub async fn update(&self, id: LeadId, update: LeadUpdate) -> Result<Lead, StoreError> {
        update.check()?;
        let patch = to_row(&Stamped::now(update))?;
        let row = self
            .store
            .update(LEADS_TABLE, &[id_filter(*id.as_uuid())], patch)
            .await?;
        debug!("Lead updated");
        from_row(row)
    }

    /// Moves a lead to `status`
    pub async fn update_status(&self, id: LeadId, status: LeadStatus) -> Result<Lead, StoreError> {
        self.update(id, LeadUpdate::status(status)).await
    }
}
