//! Ports and Adapters Infrastructure
//!
//! The data-access layer talks to storage through a port trait. Adapters
//! implement it for the hosted REST store, for an in-memory table map, and for
//! the unconfigured fallback used when no store credentials are present.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP handlers                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Repositories (lead, customer, ...)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  TableStore port (infra_store)               │
//! └─────────────────────────────────────────────────────────────┘
//!          ▲                    ▲                     ▲
//!   ┌──────┴──────┐     ┌───────┴──────┐     ┌────────┴───────┐
//!   │  PostgREST  │     │    Memory    │     │  Unconfigured  │
//!   └─────────────┘     └──────────────┘     └────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Marker trait for all domain ports
///
/// Ports are shared across request tasks, so they must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter answers but cannot do everything (e.g. no credentials)
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
    /// Health status is unknown
    Unknown,
}

impl AdapterHealth {
    /// Returns true if requests can be served at all
    pub fn is_available(&self) -> bool {
        matches!(self, AdapterHealth::Healthy | AdapterHealth::Degraded)
    }
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Builds a result stamped with the current time
    pub fn new(adapter_id: impl Into<String>, status: AdapterHealth, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Attaches a detail message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    ///
    /// # Returns
    ///
    /// A `HealthCheckResult` indicating the current health status
    async fn health_check(&self) -> HealthCheckResult;
}
