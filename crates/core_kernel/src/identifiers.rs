//! Strongly-typed identifiers for domain entities
//!
//! Newtype wrappers around UUIDs keep a customer id from being passed where a
//! ticket id is expected. Every id is assigned by the remote store; the access
//! layer only ever parses and forwards them.
//!
//! `Display` renders a short prefix (`LEAD-...`) for logs. The wire format is
//! the bare UUID (`#[serde(transparent)]`), and filters sent to the store use
//! [`as_uuid`](LeadId::as_uuid).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Sales pipeline
define_id!(LeadId, "LEAD");

// Customer records
define_id!(CustomerId, "CUST");
define_id!(PropertyId, "PROP");
define_id!(AuthUserId, "AUTH");

// Field service
define_id!(ServiceTicketId, "TKT");

// Conversations and calls
define_id!(ConversationId, "CHAT");
define_id!(CallLogId, "CALL");

// Back office
define_id!(AdminUserId, "ADM");
