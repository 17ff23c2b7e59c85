//! Request validation helpers
//!
//! Create requests derive [`validator::Validate`]. The rules run against a
//! copy whose required text is trimmed, so a name of only spaces counts as
//! missing; the request itself is stored exactly as supplied.

use validator::Validate;

use crate::error::CrmError;

/// Runs the derived rules and converts failures into a [`CrmError`]
pub fn validate<T: Validate>(request: &T) -> Result<(), CrmError> {
    request.validate().map_err(CrmError::from)
}

/// Trimmed copy of a required text field, for presence and format checks
pub fn trimmed(value: &str) -> String {
    value.trim().to_string()
}
