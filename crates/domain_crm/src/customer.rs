//! Customer records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{AuthUserId, CustomerId};

use crate::error::CrmError;
use crate::validation::{trimmed, validate};

string_enum! {
    /// Customer account status
    pub enum CustomerStatus {
        Active => "active",
        Inactive => "inactive",
        Prospect => "prospect",
    }
}

impl Default for CustomerStatus {
    fn default() -> Self {
        CustomerStatus::Active
    }
}

/// A customer row as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub auth_user_id: Option<AuthUserId>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// The summary embedded into service ticket listings
    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Customer fields embedded into other records at read time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Request to create a customer
///
/// Also used as the insert payload once [`prepare`](NewCustomer::prepare) has
/// filled the status default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewCustomer {
    pub auth_user_id: Option<AuthUserId>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
    pub status: Option<CustomerStatus>,
}

impl NewCustomer {
    /// Creates a request with only the required fields
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Validates the request and fills the status default
    pub fn prepare(self) -> Result<NewCustomer, CrmError> {
        validate(&NewCustomer {
            name: trimmed(&self.name),
            email: trimmed(&self.email),
            ..self.clone()
        })?;

        Ok(NewCustomer {
            status: Some(self.status.unwrap_or_default()),
            ..self
        })
    }
}

/// Partial update of a customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_user_id: Option<AuthUserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
}

impl CustomerUpdate {
    /// Rejects updates that would blank out a required field
    pub fn check(&self) -> Result<(), CrmError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(CrmError::invalid("name: name cannot be blank"));
        }
        if matches!(&self.email, Some(email) if !email.contains('@')) {
            return Err(CrmError::invalid("email: email must be a valid address"));
        }
        Ok(())
    }
}
