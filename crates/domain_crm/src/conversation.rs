//! Chat transcripts
//!
//! A conversation is keyed by the chat widget's session id. Saving the same
//! session again replaces its whole message sequence; it never appends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ConversationId, CustomerId, LeadId};

use crate::error::CrmError;
use crate::validation::{trimmed, validate};

string_enum! {
    /// Who wrote a chat message
    pub enum MessageSender {
        User => "user",
        Assistant => "assistant",
    }
}

/// One message in a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: MessageSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: MessageSender, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp,
        }
    }
}

/// A conversation row as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConversation {
    pub id: ConversationId,
    pub lead_id: Option<LeadId>,
    pub customer_id: Option<CustomerId>,
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request to store a transcript, keyed by `session_id`
///
/// Links that are not supplied are left out of the upsert, so a later save
/// without a lead id keeps the link made by an earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SaveConversation {
    #[validate(length(min = 1, message = "session_id is required"))]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<LeadId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl SaveConversation {
    pub fn new(session_id: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            session_id: session_id.into(),
            lead_id: None,
            customer_id: None,
            messages,
        }
    }

    /// Validates the session key; the key is stored as supplied
    pub fn prepare(self) -> Result<SaveConversation, CrmError> {
        validate(&SaveConversation {
            session_id: trimmed(&self.session_id),
            ..self.clone()
        })?;
        Ok(self)
    }
}
