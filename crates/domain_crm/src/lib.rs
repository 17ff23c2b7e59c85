//! CRM Domain
//!
//! Record types for everything the backend stores remotely:
//!
//! - **Lead**: website intake, moved through `new → contacted → qualified →
//!   proposal → won/lost` by staff
//! - **Customer**: contact and address details, optionally linked to an
//!   external authentication identity
//! - **ServiceTicket**: a job for one customer, with priority and scheduling
//! - **ChatConversation**: the transcript of one chat session, keyed by its
//!   session id
//! - **CallLog**: an append-only record of a phone call
//! - **AdminUser**: the privileged back-office account
//!
//! Each entity comes with a `New*` request that validates presence/format and
//! fills documented defaults before anything is sent to the store, and (where
//! the entity is mutable) an `*Update` carrying only the fields to change.
//! Identifiers and creation timestamps are always assigned by the store.
//!
//! # Example
//!
//! ```rust
//! use domain_crm::lead::{ContactChannel, LeadStatus, NewLead};
//!
//! let insert = NewLead::new("Dana Reyes", "dana@example.com")
//!     .prepare()
//!     .expect("valid lead");
//!
//! assert_eq!(insert.status, LeadStatus::New);
//! assert_eq!(insert.preferred_contact, ContactChannel::Email);
//! assert_eq!(insert.source, "website");
//! ```

#[macro_use]
mod macros;

pub mod admin;
pub mod call_log;
pub mod conversation;
pub mod customer;
pub mod error;
pub mod lead;
pub mod ticket;
pub mod validation;

pub use admin::{AdminUser, NewAdminUser, ADMIN_ROLE};
pub use call_log::{CallDirection, CallLog, NewCallLog, Sentiment};
pub use conversation::{ChatConversation, ChatMessage, MessageSender, SaveConversation};
pub use customer::{Customer, CustomerStatus, CustomerSummary, CustomerUpdate, NewCustomer};
pub use error::CrmError;
pub use lead::{ContactChannel, Lead, LeadInsert, LeadStatus, LeadUpdate, NewLead};
pub use ticket::{
    NewServiceTicket, ServiceTicket, ServiceTicketInsert, ServiceTicketUpdate, TicketPriority,
    TicketStatus,
};
