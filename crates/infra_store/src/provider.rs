//! Store connection provider
//!
//! The provider owns one lazily-built store per privilege tier. The first
//! call for a tier builds it; every later call returns the same instance.
//! Building never fails: a missing or unusable configuration produces the
//! [`UnconfiguredStore`] fallback, and a missing elevated key hands
//! full-privilege callers the restricted store.
//!
//! Callers can see what they actually got. A [`StoreHandle`] records both
//! the requested and the granted tier, so a silent downgrade is observable.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::postgrest::PostgrestStore;
use crate::store::{StoreBackend, TableStore};
use crate::stub::UnconfiguredStore;

/// Credential tier a caller asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Privilege {
    /// Public key, subject to row-level security
    Restricted,
    /// Service-role key, bypasses row-level security
    Full,
}

/// A store plus the tier it was requested and granted at
#[derive(Debug, Clone)]
pub struct StoreHandle {
    store: Arc<dyn TableStore>,
    requested: Privilege,
    granted: Privilege,
}

impl StoreHandle {
    pub fn new(store: Arc<dyn TableStore>, requested: Privilege, granted: Privilege) -> Self {
        Self {
            store,
            requested,
            granted,
        }
    }

    pub fn store(&self) -> Arc<dyn TableStore> {
        Arc::clone(&self.store)
    }

    pub fn requested(&self) -> Privilege {
        self.requested
    }

    pub fn granted(&self) -> Privilege {
        self.granted
    }

    /// True when full privilege was asked for but not available
    pub fn is_downgraded(&self) -> bool {
        self.requested != self.granted
    }

    pub fn backend(&self) -> StoreBackend {
        self.store.backend()
    }

    pub fn is_configured(&self) -> bool {
        self.backend() != StoreBackend::Unconfigured
    }
}

/// Hands out memoized store handles per privilege tier
#[derive(Debug)]
pub struct ConnectionProvider {
    config: StoreConfig,
    restricted: OnceCell<StoreHandle>,
    full: OnceCell<StoreHandle>,
}

impl ConnectionProvider {
    /// A provider that builds stores from `config` on first use
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            restricted: OnceCell::new(),
            full: OnceCell::new(),
        }
    }

    /// A provider with pre-built stores
    ///
    /// Without a `full` store, full-privilege callers get the restricted one,
    /// reported as a downgrade.
    pub fn with_stores(restricted: Arc<dyn TableStore>, full: Option<Arc<dyn TableStore>>) -> Self {
        let restricted_handle =
            StoreHandle::new(restricted, Privilege::Restricted, Privilege::Restricted);
        let full_handle = match full {
            Some(store) => StoreHandle::new(store, Privilege::Full, Privilege::Full),
            None => StoreHandle::new(
                restricted_handle.store(),
                Privilege::Full,
                Privilege::Restricted,
            ),
        };
        Self {
            config: StoreConfig::unconfigured(),
            restricted: OnceCell::with_value(restricted_handle),
            full: OnceCell::with_value(full_handle),
        }
    }

    /// The handle for a tier, building it on first use
    pub fn client_for(&self, privilege: Privilege) -> StoreHandle {
        match privilege {
            Privilege::Restricted => self.restricted(),
            Privilege::Full => self.full(),
        }
    }

    /// Handle for the restricted (public) tier
    pub fn restricted(&self) -> StoreHandle {
        self.restricted
            .get_or_init(|| self.build_restricted())
            .clone()
    }

    /// Handle for the full (service-role) tier, or the restricted one if no
    /// elevated key is configured
    pub fn full(&self) -> StoreHandle {
        self.full.get_or_init(|| self.build_full()).clone()
    }

    fn build_restricted(&self) -> StoreHandle {
        let store = match (&self.config.url, &self.config.anon_key) {
            (Some(url), Some(key)) => self.connect(url, key, Privilege::Restricted),
            _ => {
                warn!("Store URL or anon key not configured; using the unconfigured fallback");
                Arc::new(UnconfiguredStore::new(
                    "store URL and anon key are not configured",
                )) as Arc<dyn TableStore>
            }
        };
        StoreHandle::new(store, Privilege::Restricted, Privilege::Restricted)
    }

    fn build_full(&self) -> StoreHandle {
        match (&self.config.url, &self.config.service_key) {
            (Some(url), Some(key)) => {
                let store = self.connect(url, key, Privilege::Full);
                StoreHandle::new(store, Privilege::Full, Privilege::Full)
            }
            _ => {
                warn!("No service key; full-privilege callers get the restricted store");
                StoreHandle::new(self.restricted().store(), Privilege::Full, Privilege::Restricted)
            }
        }
    }

    fn connect(&self, url: &str, key: &str, privilege: Privilege) -> Arc<dyn TableStore> {
        match PostgrestStore::new(url, key, self.config.timeout) {
            Ok(store) => {
                info!(?privilege, rest_url = %store.rest_url(), "Store client created");
                Arc::new(store)
            }
            Err(e) => {
                warn!(
                    ?privilege,
                    error = %e,
                    "Could not build store client; using the unconfigured fallback"
                );
                Arc::new(UnconfiguredStore::new(e.message()))
            }
        }
    }
}
