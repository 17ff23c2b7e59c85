//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::HealthCheckable;

use crate::dto::health::{HealthResponse, ReadinessResponse};
use crate::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes the store used by the data routes)
///
/// An unconfigured store reports as degraded and still answers 200; an
/// unreachable one answers 503.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let handle = state.store();
    let store = handle.store().health_check().await;

    let (code, status) = if store.status.is_available() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    let body = ReadinessResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: handle.backend(),
        requested: handle.requested(),
        granted: handle.granted(),
        store,
    };
    (code, Json(body))
}
