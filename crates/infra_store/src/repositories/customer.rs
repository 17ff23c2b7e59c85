//! Customer repository

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::CustomerId;
use domain_crm::{Customer, CustomerStatus, CustomerUpdate, NewCustomer};

use super::{from_row, from_rows, id_filter, to_row, Stamped, CUSTOMERS_TABLE};
use crate::error::StoreError;
use crate::provider::StoreHandle;
use crate::query::{OrderBy, Select};
use crate::store::TableStore;

/// Data access for `security_customers`
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    store: Arc<dyn TableStore>,
}

impl CustomerRepository {
    pub fn new(handle: &StoreHandle) -> Self {
        Self::from_store(handle.store())
    }

    pub fn from_store(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Inserts a customer; status defaults to active
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: NewCustomer) -> Result<Customer, StoreError> {
        let insert = request.prepare()?;
        let row = self.store.insert(CUSTOMERS_TABLE, to_row(&insert)?).await?;
        let customer: Customer = from_row(row)?;
        debug!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Customers sorted by name, then creation time and id
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<CustomerStatus>) -> Result<Vec<Customer>, StoreError> {
        let query = Select::from(CUSTOMERS_TABLE)
            .eq_opt("status", status.map(|s| s.as_str()))
            .order(OrderBy::asc("name"))
            .order(OrderBy::asc("created_at"))
            .order(OrderBy::asc("id"));
        from_rows(self.store.select(&query).await?)
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Customer, StoreError> {
        let query = Select::from(CUSTOMERS_TABLE).filter(id_filter(*id.as_uuid()));
        from_row(self.store.select_single(&query).await?)
    }

    /// Applies the supplied fields and stamps `updated_at`
    #[instrument(skip(self, update), fields(customer_id = %id))]
    pub async fn update(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, StoreError> {
        update.check()?;
        let patch = to_row(&Stamped::now(update))?;
        let row = self
            .store
            .update(CUSTOMERS_TABLE, &[id_filter(*id.as_uuid())], patch)
            .await?;
        debug!("Customer updated");
        from_row(row)
    }
}
