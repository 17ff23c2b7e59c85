//! Core Kernel - Foundational types shared by the CRM backend
//!
//! This crate provides the building blocks used by every other crate:
//! - Strongly-typed identifiers for leads, customers, tickets and the rest
//! - Port marker and health-check traits implemented by storage adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{
    AdminUserId, AuthUserId, CallLogId, ConversationId, CustomerId, LeadId, PropertyId,
    ServiceTicketId,
};
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};
