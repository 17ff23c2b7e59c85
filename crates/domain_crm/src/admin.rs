//! Back-office admin users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::AdminUserId;

use crate::error::CrmError;
use crate::validation::{trimmed, validate};

/// Role written for the bootstrap account
pub const ADMIN_ROLE: &str = "admin";

/// An admin row as stored remotely
///
/// The password hash is read so it can be verified, but never serialized back
/// out of the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Upsert payload for an admin user, keyed by email
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewAdminUser {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password_hash is required"))]
    pub password_hash: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub role: String,
    pub is_active: bool,
}

impl NewAdminUser {
    /// An active account with the admin role
    pub fn admin(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            name: name.into(),
            role: ADMIN_ROLE.to_string(),
            is_active: true,
        }
    }

    /// Validates the payload; email is lowercased since it is the conflict key
    pub fn prepare(self) -> Result<NewAdminUser, CrmError> {
        let request = NewAdminUser {
            email: trimmed(&self.email).to_lowercase(),
            ..self
        };
        validate(&request)?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalized() {
        let admin = NewAdminUser::admin(" Owner@Example.COM ", "Owner", "$argon2id$...")
            .prepare()
            .unwrap();
        assert_eq!(admin.email, "owner@example.com");
        assert_eq!(admin.role, ADMIN_ROLE);
        assert!(admin.is_active);
    }

    #[test]
    fn test_hash_never_serialized() {
        let user: AdminUser = serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "email": "owner@example.com",
            "password_hash": "secret-hash",
            "name": "Owner",
            "role": "admin",
            "is_active": true
        }))
        .unwrap();

        assert_eq!(user.password_hash, "secret-hash");
        let out = serde_json::to_value(&user).unwrap();
        assert!(out.get("password_hash").is_none());
    }
}
