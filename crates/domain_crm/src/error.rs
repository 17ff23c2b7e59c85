//! CRM domain errors
//!
//! Everything here is raised before a query is issued: a request that fails
//! presence/format checks or names a value outside a closed set never reaches
//! the store.

use thiserror::Error;

/// Errors raised while preparing a CRM request
#[derive(Debug, Error)]
pub enum CrmError {
    /// One or more fields failed validation
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A value outside a closed set (status, priority, ...)
    #[error("Unknown {kind} value: '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

impl CrmError {
    /// Creates a Validation error from a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        CrmError::Validation(vec![message.into()])
    }

    /// Creates an UnknownValue error
    pub fn unknown_value(kind: &'static str, value: impl Into<String>) -> Self {
        CrmError::UnknownValue {
            kind,
            value: value.into(),
        }
    }

    /// Individual messages, one per failed rule
    pub fn messages(&self) -> Vec<String> {
        match self {
            CrmError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<validator::ValidationErrors> for CrmError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| match &error.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, error.code),
                })
            })
            .collect();
        messages.sort();
        CrmError::Validation(messages)
    }
}
