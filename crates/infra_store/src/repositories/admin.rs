//! Admin user repository
//!
//! Writes here bypass row-level security, so callers should build this
//! repository from a full-privilege handle.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use domain_crm::{AdminUser, NewAdminUser};

use super::{from_row, from_rows, to_row, Stamped, ADMIN_USERS_TABLE};
use crate::error::StoreError;
use crate::provider::StoreHandle;
use crate::query::Select;
use crate::store::TableStore;

/// Data access for `security_admin_users`
#[derive(Debug, Clone)]
pub struct AdminUserRepository {
    store: Arc<dyn TableStore>,
}

impl AdminUserRepository {
    /// Creates the repository, warning when the handle was downgraded
    pub fn new(handle: &StoreHandle) -> Self {
        if handle.is_downgraded() {
            warn!("Admin repository running without elevated store privilege");
        }
        Self::from_store(handle.store())
    }

    pub fn from_store(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Creates the admin, or updates the one with the same email
    #[instrument(skip(self, admin), fields(email = %admin.email))]
    pub async fn upsert_admin(&self, admin: NewAdminUser) -> Result<AdminUser, StoreError> {
        let admin = admin.prepare()?;
        let row = to_row(&Stamped::now(admin))?;
        let saved = self.store.upsert(ADMIN_USERS_TABLE, row, "email").await?;
        let user: AdminUser = from_row(saved)?;
        info!(admin_id = %user.id, "Admin user upserted");
        Ok(user)
    }

    /// Looks up an admin by email; stored emails are lowercase
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, StoreError> {
        let query = Select::from(ADMIN_USERS_TABLE).eq("email", email.trim().to_lowercase());
        let users: Vec<AdminUser> = from_rows(self.store.select(&query).await?)?;
        Ok(users.into_iter().next())
    }
}
