//! Shared request DTOs

use serde::Deserialize;

/// `?status=` filter on list endpoints
///
/// Kept as raw text so an out-of-set value is reported as a validation
/// failure rather than a generic query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

impl StatusQuery {
    /// Parses the filter into the entity's status enum
    pub fn parse<S>(&self) -> Result<Option<S>, S::Err>
    where
        S: std::str::FromStr,
    {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

/// Body of `PUT /:id/status`
#[derive(Debug, Deserialize)]
pub struct StatusChange<S> {
    pub status: S,
}
