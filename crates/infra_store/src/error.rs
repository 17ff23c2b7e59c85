//! Store error types
//!
//! Every adapter behind the `TableStore` port reports failures through
//! [`StoreError`]. The hosted REST store answers errors with a JSON body
//! carrying a Postgres or PostgREST code; those codes are mapped onto the
//! variants below so callers can branch on the kind instead of parsing text.

use serde::Deserialize;
use thiserror::Error;

use domain_crm::CrmError;

/// Errors that can occur while talking to the remote store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No usable store credentials; the unconfigured fallback refused a write
    #[error("Store not configured: {0}")]
    Configuration(String),

    /// A single-row read or update matched nothing
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A single-row read or update matched more than one row
    #[error("Expected a single row, query matched {0}")]
    MultipleRows(usize),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The credential in use may not touch the table (row-level security)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Any other rejection from the store
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// A row could not be encoded or decoded
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The request failed domain validation before reaching the store
    #[error(transparent)]
    Invalid(#[from] CrmError),
}

impl StoreError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// ```rust
    /// use infra_store::StoreError;
    ///
    /// let error = StoreError::not_found("Lead", "LEAD-123");
    /// assert!(error.to_string().contains("Lead"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Builds the error for a failed REST response
    ///
    /// The Postgres/PostgREST code in the body decides the kind; HTTP 401/403
    /// without a recognised code is still a permission failure.
    pub fn from_response(status: u16, body: PostgrestErrorBody) -> Self {
        let message = body.message();
        match body.code.as_deref() {
            Some("PGRST116") => StoreError::NotFound(message),
            Some("23505") => StoreError::DuplicateEntry(message),
            Some("23503") => StoreError::ForeignKeyViolation(message),
            Some("23514") | Some("23502") => StoreError::ConstraintViolation(message),
            Some("42501") => StoreError::PermissionDenied(message),
            _ if status == 401 || status == 403 => StoreError::PermissionDenied(message),
            _ => StoreError::QueryFailed(message),
        }
    }

    /// The underlying message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            StoreError::Configuration(m)
            | StoreError::NotFound(m)
            | StoreError::DuplicateEntry(m)
            | StoreError::ForeignKeyViolation(m)
            | StoreError::ConstraintViolation(m)
            | StoreError::PermissionDenied(m)
            | StoreError::QueryFailed(m)
            | StoreError::Transport(m)
            | StoreError::Timeout(m)
            | StoreError::SerializationError(m) => m.clone(),
            StoreError::MultipleRows(_) | StoreError::Invalid(_) => self.to_string(),
        }
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Checks if the store was never configured
    pub fn is_configuration(&self) -> bool {
        matches!(self, StoreError::Configuration(_))
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateEntry(_)
                | StoreError::ForeignKeyViolation(_)
                | StoreError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(self, StoreError::Transport(_) | StoreError::Timeout(_))
    }

    /// Checks if the store itself rejected or failed the operation
    pub fn is_persistence(&self) -> bool {
        !matches!(
            self,
            StoreError::Configuration(_) | StoreError::NotFound(_) | StoreError::Invalid(_)
        )
    }
}

/// Error body returned by PostgREST
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostgrestErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl PostgrestErrorBody {
    /// Parses a response body, keeping raw text when it is not the JSON shape
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| PostgrestErrorBody {
            message: (!raw.trim().is_empty()).then(|| raw.trim().to_string()),
            ..Default::default()
        })
    }

    fn message(&self) -> String {
        match (&self.message, &self.details) {
            (Some(message), Some(details)) => format!("{} ({})", message, details),
            (Some(message), None) => message.clone(),
            (None, Some(details)) => details.clone(),
            (None, None) => "store returned an error without a message".to_string(),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            StoreError::Timeout(error.to_string())
        } else if error.is_decode() {
            StoreError::SerializationError(error.to_string())
        } else {
            StoreError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::SerializationError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: &str, message: &str) -> PostgrestErrorBody {
        PostgrestErrorBody {
            code: Some(code.to_string()),
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_postgres_codes_map_to_kinds() {
        assert!(matches!(
            StoreError::from_response(409, body("23505", "dup")),
            StoreError::DuplicateEntry(_)
        ));
        assert!(matches!(
            StoreError::from_response(409, body("23503", "fk")),
            StoreError::ForeignKeyViolation(_)
        ));
        assert!(matches!(
            StoreError::from_response(406, body("PGRST116", "no rows")),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            StoreError::from_response(403, body("42501", "rls")),
            StoreError::PermissionDenied(_)
        ));
        assert!(matches!(
            StoreError::from_response(400, body("42P01", "missing table")),
            StoreError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_unauthorized_without_code_is_permission_denied() {
        let err = StoreError::from_response(401, PostgrestErrorBody::parse("Invalid API key"));
        assert!(matches!(err, StoreError::PermissionDenied(ref m) if m == "Invalid API key"));
    }

    #[test]
    fn test_message_keeps_details() {
        let mut b = body("23505", "duplicate key value violates unique constraint");
        b.details = Some("Key (email)=(a@b.c) already exists.".to_string());
        let err = StoreError::from_response(409, b);
        assert_eq!(
            err.message(),
            "duplicate key value violates unique constraint (Key (email)=(a@b.c) already exists.)"
        );
    }

    #[test]
    fn test_classification() {
        assert!(StoreError::not_found("Lead", "x").is_not_found());
        assert!(!StoreError::not_found("Lead", "x").is_persistence());
        assert!(StoreError::Configuration("no url".into()).is_configuration());
        assert!(StoreError::Timeout("slow".into()).is_connection_error());
        assert!(StoreError::DuplicateEntry("dup".into()).is_constraint_violation());
        assert!(StoreError::QueryFailed("boom".into()).is_persistence());
    }
}
