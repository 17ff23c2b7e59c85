//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! CRM backend test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built requests for common entities
//! - `builders`: Builders for JSON request bodies sent to the HTTP API
//! - `store`: Connection providers backed by in-memory or unconfigured stores
//! - `assertions`: Assertion helpers for records and store errors
//! - `generators`: Property-based and fake-data generators

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod store;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use store::*;
