//! Custom Test Assertions
//!
//! Assertion helpers for store results that give more meaningful failure
//! messages than bare `assert!` calls.

use chrono::{DateTime, Utc};
use serde_json::Value;

use domain_crm::{Customer, CrmError};
use infra_store::StoreError;

/// Asserts that a store call failed because the record does not exist
pub fn assert_not_found<T: std::fmt::Debug>(result: Result<T, StoreError>) {
    match result {
        Err(err) if err.is_not_found() => {}
        other => panic!("Expected a not-found error, got {:?}", other),
    }
}

/// Asserts that a store call failed because the store is not configured
pub fn assert_configuration_error<T: std::fmt::Debug>(result: Result<T, StoreError>) {
    match result {
        Err(err) if err.is_configuration() => {}
        other => panic!("Expected a configuration error, got {:?}", other),
    }
}

/// Asserts that a store call was rejected by local validation and that one
/// of the messages mentions `field`
pub fn assert_validation_error<T: std::fmt::Debug>(result: Result<T, StoreError>, field: &str) {
    match result {
        Err(StoreError::Invalid(err @ CrmError::Validation(_))) => {
            let messages = err.messages();
            assert!(
                messages.iter().any(|m| m.contains(field)),
                "Validation messages {:?} do not mention {}",
                messages,
                field
            );
        }
        other => panic!("Expected a validation error on {}, got {:?}", field, other),
    }
}

/// Asserts that timestamps never decrease
pub fn assert_created_ascending(stamps: &[DateTime<Utc>]) {
    for pair in stamps.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "Timestamps out of order: {} before {}",
            pair[0],
            pair[1]
        );
    }
}

/// Asserts that timestamps never increase
pub fn assert_created_descending(stamps: &[DateTime<Utc>]) {
    for pair in stamps.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "Timestamps out of order: {} before {}",
            pair[0],
            pair[1]
        );
    }
}

/// Asserts customers are listed by name, then creation time
pub fn assert_customers_by_name(customers: &[Customer]) {
    for pair in customers.windows(2) {
        let key = |c: &Customer| (c.name.clone(), c.created_at);
        assert!(
            key(&pair[0]) <= key(&pair[1]),
            "Customers out of order: {:?} before {:?}",
            pair[0].name,
            pair[1].name
        );
    }
}

/// Asserts the standard error envelope and returns its message
pub fn assert_error_body(body: &Value) -> String {
    assert_eq!(
        body.get("success"),
        Some(&Value::Bool(false)),
        "Expected success=false in {}",
        body
    );
    body.get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| panic!("Expected an error message in {}", body))
}
