//! Leads captured from the website contact form and chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::LeadId;

use crate::error::CrmError;
use crate::validation::{trimmed, validate};

/// Source recorded when intake does not say where the lead came from
pub const DEFAULT_LEAD_SOURCE: &str = "website";

string_enum! {
    /// Lead lifecycle status
    pub enum LeadStatus {
        New => "new",
        Contacted => "contacted",
        Qualified => "qualified",
        Proposal => "proposal",
        Won => "won",
        Lost => "lost",
    }
}

impl LeadStatus {
    /// Won and lost leads are closed
    pub fn is_closed(&self) -> bool {
        matches!(self, LeadStatus::Won | LeadStatus::Lost)
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        LeadStatus::New
    }
}

string_enum! {
    /// How the lead would like to be contacted
    pub enum ContactChannel {
        Email => "email",
        Phone => "phone",
        Text => "text",
    }
}

impl Default for ContactChannel {
    fn default() -> Self {
        ContactChannel::Email
    }
}

/// A lead row as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub preferred_contact: Option<ContactChannel>,
    pub source: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Intake request for a new lead
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewLead {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub preferred_contact: Option<ContactChannel>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
}

impl NewLead {
    /// Creates a request with only the required fields
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Validates the request and fills defaults
    ///
    /// # Errors
    ///
    /// Returns `CrmError::Validation` if name is blank or email is malformed
    pub fn prepare(self) -> Result<LeadInsert, CrmError> {
        validate(&NewLead {
            name: trimmed(&self.name),
            email: trimmed(&self.email),
            ..self.clone()
        })?;

        Ok(LeadInsert {
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            preferred_contact: self.preferred_contact.unwrap_or_default(),
            source: self
                .source
                .unwrap_or_else(|| DEFAULT_LEAD_SOURCE.to_string()),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Insert payload with every default applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadInsert {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub preferred_contact: ContactChannel,
    pub source: String,
    pub status: LeadStatus,
}

/// Partial update of a lead; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact: Option<ContactChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl LeadUpdate {
    /// An update that only moves the lead to a new status
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Rejects updates that would blank out the name or break the email
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let insert = NewLead::new("Dana", "dana@example.com").prepare().unwrap();

        assert_eq!(insert.status, LeadStatus::New);
        assert_eq!(insert.preferred_contact, ContactChannel::Email);
        assert_eq!(insert.source, DEFAULT_LEAD_SOURCE);
        assert_eq!(insert.phone, None);
    }

    #[test]
    fn test_supplied_values_survive() {
        let insert = NewLead {
            preferred_contact: Some(ContactChannel::Text),
            source: Some("chat".to_string()),
            status: Some(LeadStatus::Qualified),
            ..NewLead::new("Dana", "dana@example.com")
        }
        .prepare()
        .unwrap();

        assert_eq!(insert.preferred_contact, ContactChannel::Text);
        assert_eq!(insert.source, "chat");
        assert_eq!(insert.status, LeadStatus::Qualified);
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = NewLead::new("   ", "dana@example.com").prepare().unwrap_err();
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn test_text_stored_as_supplied() {
        let insert = NewLead {
            phone: Some(" 555 ".to_string()),
            message: Some(String::new()),
            ..NewLead::new(" Dana ", "dana@example.com")
        }
        .prepare()
        .unwrap();

        assert_eq!(insert.name, " Dana ");
        assert_eq!(insert.phone.as_deref(), Some(" 555 "));
        assert_eq!(insert.message.as_deref(), Some(""));
    }

    #[test]
    fn test_update_check() {
        let blank = LeadUpdate {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.check().is_err());

        let bad_email = LeadUpdate {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(bad_email.check().is_err());

        assert!(LeadUpdate::status(LeadStatus::Won).check().is_ok());
    }

    #[test]
    fn test_status_update_serializes_only_status() {
        let json = serde_json::to_value(LeadUpdate::status(LeadStatus::Won)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "won" }));
    }
}
