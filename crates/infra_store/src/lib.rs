//! Store Infrastructure
//!
//! This crate owns every path from the CRM backend to its remote store:
//!
//! - [`ConnectionProvider`] hands out one memoized store per privilege tier
//!   and never fails to initialise
//! - [`TableStore`] is the port the repositories talk to, with three adapters:
//!   [`PostgrestStore`] for the hosted store, [`MemoryStore`] for tests and
//!   local runs, and [`UnconfiguredStore`] when no credentials are present
//! - [`repositories`] maps each CRM table to typed operations
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::{ConnectionProvider, Privilege, StoreConfig};
//! use infra_store::repositories::LeadRepository;
//!
//! let provider = ConnectionProvider::new(
//!     StoreConfig::new("https://project.supabase.co").anon_key("anon"),
//! );
//! let leads = LeadRepository::new(&provider.client_for(Privilege::Restricted));
//! let open = leads.list(None).await?;
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod postgrest;
pub mod provider;
pub mod query;
pub mod repositories;
pub mod store;
pub mod stub;

pub use config::StoreConfig;
pub use error::{PostgrestErrorBody, StoreError};
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use provider::{ConnectionProvider, Privilege, StoreHandle};
pub use query::{Direction, Embed, Filter, OrderBy, Row, Select};
pub use store::{StoreBackend, TableStore};
pub use stub::UnconfiguredStore;
