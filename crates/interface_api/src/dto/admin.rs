//! Admin bootstrap DTOs

use serde::Serialize;

use core_kernel::AdminUserId;

/// Result of `POST /api/auth/setup-admin`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupAdminResponse {
    pub success: bool,
    pub message: String,
    pub user_id: AdminUserId,
}

/// Result of `GET /api/auth/setup-admin`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupAdminStatus {
    pub success: bool,
    /// Whether an admin credential is configured
    pub configured: bool,
    /// Whether the admin row exists in the store
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<AdminUserId>,
}
