//! Route handlers, one module per resource

use std::str::FromStr;

use crate::error::ApiError;

pub mod admin;
pub mod call_logs;
pub mod conversations;
pub mod customers;
pub mod health;
pub mod leads;
pub mod tickets;

/// Parses a path id, accepting a bare UUID or the prefixed display form
pub(crate) fn parse_id<T>(raw: &str, entity: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = uuid::Error>,
{
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {} id: '{}'", entity, raw)))
}
