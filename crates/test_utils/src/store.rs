//! Store Test Utilities
//!
//! Connection providers wired to stores that need no network, so repository
//! and HTTP tests run against the same code paths as production.

use std::sync::Arc;

use infra_store::{ConnectionProvider, MemoryStore, TableStore, UnconfiguredStore};

/// A provider whose both tiers share one in-memory store
///
/// The store is returned alongside so tests can inspect rows directly.
pub fn memory_provider() -> (Arc<MemoryStore>, Arc<ConnectionProvider>) {
    let store = Arc::new(MemoryStore::new());
    let provider = ConnectionProvider::with_stores(store.clone(), None);
    (store, Arc::new(provider))
}

/// A provider with separate restricted and full in-memory stores
pub fn tiered_memory_provider() -> (Arc<MemoryStore>, Arc<MemoryStore>, Arc<ConnectionProvider>) {
    let restricted = Arc::new(MemoryStore::new());
    let full = Arc::new(MemoryStore::new());
    let provider = ConnectionProvider::with_stores(
        restricted.clone(),
        Some(full.clone() as Arc<dyn TableStore>),
    );
    (restricted, full, Arc::new(provider))
}

/// A provider for a deployment with no store settings at all
pub fn unconfigured_provider() -> Arc<ConnectionProvider> {
    let store = Arc::new(UnconfiguredStore::new("store URL is not configured"));
    Arc::new(ConnectionProvider::with_stores(store, None))
}
