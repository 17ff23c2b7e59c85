//! Test Request Builders
//!
//! Builders for the JSON bodies the HTTP API accepts. Tests specify only the
//! fields they care about; everything else keeps a valid default. Bodies are
//! plain JSON so tests can also send values the typed requests would reject.

use serde_json::{json, Map, Value};

use crate::fixtures::ConversationFixtures;

/// Builder for `POST /api/leads` bodies
#[derive(Debug, Clone)]
pub struct LeadRequestBuilder {
    fields: Map<String, Value>,
}

impl Default for LeadRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadRequestBuilder {
    /// Creates a builder with a valid name and email
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Dana Reyes"));
        fields.insert("email".to_string(), json!("dana@example.com"));
        Self { fields }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with("name", json!(name.into()))
    }

    pub fn with_email(self, email: impl Into<String>) -> Self {
        self.with("email", json!(email.into()))
    }

    pub fn with_phone(self, phone: impl Into<String>) -> Self {
        self.with("phone", json!(phone.into()))
    }

    /// Status as raw text, so out-of-set values can be sent
    pub fn with_status(self, status: &str) -> Self {
        self.with("status", json!(status))
    }

    pub fn with_preferred_contact(self, channel: &str) -> Self {
        self.with("preferred_contact", json!(channel))
    }

    /// Sets an arbitrary field
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Drops a field entirely
    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Builder for `POST /api/customers` bodies
#[derive(Debug, Clone)]
pub struct CustomerRequestBuilder {
    fields: Map<String, Value>,
}

impl Default for CustomerRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerRequestBuilder {
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Acme Storage"));
        fields.insert("email".to_string(), json!("ops@acme.example.com"));
        Self { fields }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with("name", json!(name.into()))
    }

    pub fn with_email(self, email: impl Into<String>) -> Self {
        self.with("email", json!(email.into()))
    }

    pub fn with_status(self, status: &str) -> Self {
        self.with("status", json!(status))
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Builder for `POST /api/service-tickets` bodies
#[derive(Debug, Clone)]
pub struct TicketRequestBuilder {
    fields: Map<String, Value>,
}

impl TicketRequestBuilder {
    /// Creates a builder for a ticket on the given customer id
    pub fn new(customer_id: impl std::fmt::Display) -> Self {
        let mut fields = Map::new();
        fields.insert("customer_id".to_string(), json!(customer_id.to_string()));
        fields.insert("title".to_string(), json!("Camera offline"));
        Self { fields }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with("title", json!(title.into()))
    }

    pub fn with_priority(self, priority: &str) -> Self {
        self.with("priority", json!(priority))
    }

    pub fn with_status(self, status: &str) -> Self {
        self.with("status", json!(status))
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Body for `POST /api/chat/conversations`
pub fn conversation_request(session_id: &str) -> Value {
    json!({
        "session_id": session_id,
        "messages": ConversationFixtures::greeting(),
    })
}
