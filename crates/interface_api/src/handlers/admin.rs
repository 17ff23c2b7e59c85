//! Admin bootstrap handlers
//!
//! `POST` writes the configured admin account (idempotent, keyed by email).
//! `GET` only reports whether that account exists.

use axum::{extract::State, Json};
use tracing::info;

use domain_crm::NewAdminUser;

use crate::auth::hash_password;
use crate::config::AdminCredential;
use crate::dto::admin::{SetupAdminResponse, SetupAdminStatus};
use crate::{error::ApiError, AppState};

fn credential(state: &AppState) -> Result<AdminCredential, ApiError> {
    state.config.admin_credential().ok_or_else(|| {
        ApiError::Unavailable(
            "Admin credential is not configured (API_ADMIN_EMAIL, API_ADMIN_PASSWORD)".to_string(),
        )
    })
}

/// Creates or updates the admin user with a freshly hashed password
pub async fn setup_admin(
    State(state): State<AppState>,
) -> Result<Json<SetupAdminResponse>, ApiError> {
    let AdminCredential { email, password, name } = credential(&state)?;

    // hashing is CPU-bound, so it runs on the blocking pool
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))??;

    let user = state
        .admins()
        .upsert_admin(NewAdminUser::admin(email, name, password_hash))
        .await?;
    info!(admin_id = %user.id, "Admin bootstrap complete");

    Ok(Json(SetupAdminResponse {
        success: true,
        message: "Admin user created/updated successfully".to_string(),
        user_id: user.id,
    }))
}

/// Reports whether the configured admin exists, without writing anything
pub async fn admin_status(
    State(state): State<AppState>,
) -> Result<Json<SetupAdminStatus>, ApiError> {
    let Some(credential) = state.config.admin_credential() else {
        return Ok(Json(SetupAdminStatus {
            success: true,
            configured: false,
            exists: false,
            user_id: None,
        }));
    };

    let user = state.admins().find_by_email(&credential.email).await?;
    Ok(Json(SetupAdminStatus {
        success: true,
        configured: true,
        exists: user.is_some(),
        user_id: user.map(|u| u.id),
    }))
}
