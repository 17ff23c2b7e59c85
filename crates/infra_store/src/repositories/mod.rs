//! Repositories for the CRM tables
//!
//! Each repository wraps one table behind typed operations. Requests are
//! validated and defaulted by `domain_crm` before anything is sent; rows
//! coming back are decoded into the domain records.
//!
//! Update and upsert payloads are stamped with `updated_at` here, so the
//! timestamp reflects the moment the repository issued the write.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::StoreError;
use crate::query::{Filter, Row};

pub mod admin;
pub mod call_log;
pub mod conversation;
pub mod customer;
pub mod lead;
pub mod ticket;

pub use admin::AdminUserRepository;
pub use call_log::CallLogRepository;
pub use conversation::ConversationRepository;
pub use customer::CustomerRepository;
pub use lead::LeadRepository;
pub use ticket::ServiceTicketRepository;

pub const LEADS_TABLE: &str = "security_leads";
pub const CUSTOMERS_TABLE: &str = "security_customers";
pub const SERVICE_TICKETS_TABLE: &str = "security_service_tickets";
pub const CHAT_CONVERSATIONS_TABLE: &str = "security_chat_conversations";
pub const CALL_LOGS_TABLE: &str = "security_call_logs";
pub const ADMIN_USERS_TABLE: &str = "security_admin_users";

/// A write payload with `updated_at` set alongside its own fields
#[derive(Debug, Serialize)]
pub(crate) struct Stamped<T> {
    #[serde(flatten)]
    pub fields: T,
    pub updated_at: DateTime<Utc>,
}

impl<T: Serialize> Stamped<T> {
    pub fn now(fields: T) -> Self {
        Self {
            fields,
            updated_at: Utc::now(),
        }
    }
}

pub(crate) fn id_filter(id: Uuid) -> Filter {
    Filter::eq("id", id.to_string())
}

pub(crate) fn to_row<T: Serialize>(value: &T) -> Result<Row, StoreError> {
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, StoreError> {
    Ok(serde_json::from_value(row)?)
}

pub(crate) fn from_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, StoreError> {
    rows.into_iter().map(from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Patch {
        status: &'static str,
    }

    #[test]
    fn test_stamped_flattens_fields() {
        let row = to_row(&Stamped::now(Patch { status: "won" })).unwrap();
        assert_eq!(row["status"], "won");
        assert!(row["updated_at"].is_string());
    }

    #[test]
    fn test_id_filter_uses_bare_uuid() {
        let id = Uuid::nil();
        assert_eq!(
            id_filter(id),
            Filter::eq("id", json!("00000000-0000-0000-0000-000000000000"))
        );
    }
}
