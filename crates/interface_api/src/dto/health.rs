//! Health DTOs

use serde::Serialize;

use core_kernel::HealthCheckResult;
use infra_store::{Privilege, StoreBackend};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness including the store the data routes will use
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub backend: StoreBackend,
    pub requested: Privilege,
    pub granted: Privilege,
    pub store: HealthCheckResult,
}
