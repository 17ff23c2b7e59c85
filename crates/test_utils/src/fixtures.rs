//! Pre-built Test Fixtures
//!
//! Ready-to-use requests for each CRM entity. Values are fixed so tests can
//! assert on them without threading data through.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use core_kernel::{CustomerId, LeadId};
use domain_crm::{
    CallDirection, ChatMessage, ContactChannel, MessageSender, NewCallLog, NewCustomer, NewLead,
    NewServiceTicket, SaveConversation, Sentiment, TicketPriority,
};

/// Fixture for lead intake requests
pub struct LeadFixtures;

impl LeadFixtures {
    /// A lead with only the required fields
    pub fn minimal() -> NewLead {
        NewLead::new("Dana Reyes", "dana@example.com")
    }

    /// A lead from the website form asking for a phone call
    pub fn website_phone() -> NewLead {
        NewLead {
            phone: Some("555-0142".to_string()),
            message: Some("Need cameras for the warehouse".to_string()),
            preferred_contact: Some(ContactChannel::Phone),
            ..NewLead::new("Marco Bell", "marco@example.com")
        }
    }

    /// A lead whose email fails format validation
    pub fn invalid_email() -> NewLead {
        NewLead::new("Bad Email", "not-an-email")
    }
}

/// Fixture for customer requests
pub struct CustomerFixtures;

impl CustomerFixtures {
    pub fn acme() -> NewCustomer {
        NewCustomer {
            phone: Some("555-0100".to_string()),
            company: Some("Acme Storage".to_string()),
            address: Some("12 Dock Road".to_string()),
            city: Some("Portland".to_string()),
            state: Some("OR".to_string()),
            zip: Some("97201".to_string()),
            ..NewCustomer::new("Acme Storage", "ops@acme.example.com")
        }
    }

    pub fn named(name: &str) -> NewCustomer {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        NewCustomer::new(name, email)
    }
}

/// Fixture for service ticket requests
pub struct TicketFixtures;

impl TicketFixtures {
    /// A ticket with default priority and status
    pub fn camera_offline(customer_id: CustomerId) -> NewServiceTicket {
        NewServiceTicket::new(customer_id, "Camera offline")
    }

    pub fn emergency(customer_id: CustomerId) -> NewServiceTicket {
        NewServiceTicket {
            priority: Some(TicketPriority::Emergency),
            description: Some("Alarm panel reports tamper".to_string()),
            ..NewServiceTicket::new(customer_id, "Alarm tamper")
        }
    }
}

/// Fixture for chat transcripts
pub struct ConversationFixtures;

impl ConversationFixtures {
    /// Fixed instant used for message timestamps
    pub fn sent_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    pub fn greeting() -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(MessageSender::User, "Do you install gate sensors?", Self::sent_at()),
            ChatMessage::new(MessageSender::Assistant, "Yes, we do.", Self::sent_at()),
        ]
    }

    pub fn session(session_id: &str) -> SaveConversation {
        SaveConversation::new(session_id, Self::greeting())
    }

    pub fn linked(session_id: &str, lead_id: LeadId) -> SaveConversation {
        SaveConversation {
            lead_id: Some(lead_id),
            ..Self::session(session_id)
        }
    }
}

/// Fixture for call records
pub struct CallLogFixtures;

impl CallLogFixtures {
    pub fn inbound() -> NewCallLog {
        NewCallLog {
            caller_name: Some("Dana Reyes".to_string()),
            caller_phone: Some("555-0142".to_string()),
            duration_seconds: Some(184),
            call_type: Some(CallDirection::Inbound),
            sentiment: Some(Sentiment::Positive),
            summary: Some("Asked for a quote".to_string()),
            transcript: Some(json!([{ "speaker": "caller", "text": "Hi" }])),
            provider_call_id: Some("call_0001".to_string()),
            ..Default::default()
        }
    }
}

/// Fixture for admin bootstrap settings
pub struct AdminFixtures;

impl AdminFixtures {
    pub const EMAIL: &'static str = "Owner@Example.com";
    pub const PASSWORD: &'static str = "correct horse battery";
    pub const NAME: &'static str = "Site Owner";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_pass_validation() {
        assert!(LeadFixtures::minimal().prepare().is_ok());
        assert!(LeadFixtures::website_phone().prepare().is_ok());
        assert!(LeadFixtures::invalid_email().prepare().is_err());
        assert!(CustomerFixtures::acme().prepare().is_ok());
        assert!(CustomerFixtures::named("Jo Park").prepare().is_ok());
        assert!(TicketFixtures::emergency(CustomerId::new()).prepare().is_ok());
        assert!(ConversationFixtures::session("sess-1").prepare().is_ok());
        assert!(CallLogFixtures::inbound().prepare().is_ok());
    }
}
