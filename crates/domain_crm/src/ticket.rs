//! Service tickets
//!
//! A ticket belongs to exactly one customer. Listings embed a
//! [`CustomerSummary`] read from the customers table in the same query; the
//! summary is never written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CustomerId, PropertyId, ServiceTicketId};

use crate::customer::CustomerSummary;
use crate::error::CrmError;
use crate::validation::{trimmed, validate};

string_enum! {
    /// How urgently the job must be handled
    pub enum TicketPriority {
        Emergency => "emergency",
        Urgent => "urgent",
        Normal => "normal",
        Low => "low",
    }
}

impl Default for TicketPriority {
    fn default() -> Self {
        TicketPriority::Normal
    }
}

string_enum! {
    /// Ticket lifecycle status
    pub enum TicketStatus {
        Open => "open",
        Assigned => "assigned",
        Scheduled => "scheduled",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl TicketStatus {
    /// Completed and cancelled tickets need no further work
    pub fn is_closed(&self) -> bool {
        matches!(self, TicketStatus::Completed | TicketStatus::Cancelled)
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        TicketStatus::Open
    }
}

/// A service ticket row, optionally with its customer embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTicket {
    pub id: ServiceTicketId,
    pub customer_id: CustomerId,
    pub property_id: Option<PropertyId>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TicketPriority,
    #[serde(default)]
    pub status: TicketStatus,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,
}

/// Request to open a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewServiceTicket {
    pub customer_id: CustomerId,
    pub property_id: Option<PropertyId>,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TicketPriority>,
    pub status: Option<TicketStatus>,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl NewServiceTicket {
    /// Creates a request with only the required fields
    pub fn new(customer_id: CustomerId, title: impl Into<String>) -> Self {
        Self {
            customer_id,
            property_id: None,
            title: title.into(),
            description: None,
            priority: None,
            status: None,
            assigned_to: None,
            scheduled_date: None,
            completed_date: None,
            notes: None,
        }
    }

    /// Validates the request and fills priority/status defaults
    pub fn prepare(self) -> Result<ServiceTicketInsert, CrmError> {
        validate(&NewServiceTicket {
            title: trimmed(&self.title),
            ..self.clone()
        })?;

        Ok(ServiceTicketInsert {
            customer_id: self.customer_id,
            property_id: self.property_id,
            title: self.title,
            description: self.description,
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            assigned_to: self.assigned_to,
            scheduled_date: self.scheduled_date,
            completed_date: self.completed_date,
            notes: self.notes,
        })
    }
}

/// Insert payload with priority and status resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceTicketInsert {
    pub customer_id: CustomerId,
    pub property_id: Option<PropertyId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Partial update of a ticket (assignment, scheduling, status)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceTicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ServiceTicketUpdate {
    /// Rejects updates that would blank out the title
    pub fn check(&self) -> Result<(), CrmError> {
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(CrmError::invalid("title: title cannot be blank"));
        }
        Ok(())
    }
}
