//! Service ticket repository
//!
//! Reads embed the owning customer's summary (id, name, email, phone) in the
//! same query. Writes return the bare ticket row.

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::ServiceTicketId;
use domain_crm::{NewServiceTicket, ServiceTicket, ServiceTicketUpdate, TicketStatus};

use super::{
    from_row, from_rows, id_filter, to_row, Stamped, CUSTOMERS_TABLE, SERVICE_TICKETS_TABLE,
};
use crate::error::StoreError;
use crate::provider::StoreHandle;
use crate::query::{Embed, OrderBy, Select};
use crate::store::TableStore;

fn customer_embed() -> Embed {
    Embed::new(
        "customer",
        CUSTOMERS_TABLE,
        "customer_id",
        &["id", "name", "email", "phone"],
    )
}

/// Data access for `security_service_tickets`
#[derive(Debug, Clone)]
pub struct ServiceTicketRepository {
    store: Arc<dyn TableStore>,
}

impl ServiceTicketRepository {
    pub fn new(handle: &StoreHandle) -> Self {
        Self::from_store(handle.store())
    }

    pub fn from_store(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Opens a ticket; priority defaults to normal and status to open
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn create(&self, request: NewServiceTicket) -> Result<ServiceTicket, StoreError> {
        let insert = request.prepare()?;
        let row = self.store.insert(SERVICE_TICKETS_TABLE, to_row(&insert)?).await?;
        let ticket: ServiceTicket = from_row(row)?;
        debug!(ticket_id = %ticket.id, "Service ticket created");
        Ok(ticket)
    }

    /// Tickets with their customer, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        status: Option<TicketStatus>,
    ) -> Result<Vec<ServiceTicket>, StoreError> {
        let query = Select::from(SERVICE_TICKETS_TABLE)
            .embed(customer_embed())
            .eq_opt("status", status.map(|s| s.as_str()))
            .order(OrderBy::desc("created_at"))
            .order(OrderBy::desc("id"));
        from_rows(self.store.select(&query).await?)
    }

    #[instrument(skip(self), fields(ticket_id = %id))]
    pub async fn get_by_id(&self, id: ServiceTicketId) -> Result<ServiceTicket, StoreError> {
        let query = Select::from(SERVICE_TICKETS_TABLE)
            .embed(customer_embed())
            .filter(id_filter(*id.as_uuid()));
        from_row(self.store.select_single(&query).await?)
    }

    /// Applies the supplied fields and stamps `updated_at`
    #[instrument(skip(self, update), fields(ticket_id = %id))]
    pub async fn update(
        &self,
        id: ServiceTicketId,
        update: ServiceTicketUpdate,
    ) -> Result<ServiceTicket, StoreError> {
        update.check()?;
        let patch = to_row(&Stamped::now(update))?;
        let row = self
            .store
            .update(SERVICE_TICKETS_TABLE, &[id_filter(*id.as_uuid())], patch)
            .await?;
        debug!("Service ticket updated");
        from_row(row)
    }
}
