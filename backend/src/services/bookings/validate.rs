//! Field-presence and non-empty-tests checks for booking submissions.
//!
//! The body is inspected as loose JSON rather than deserialized straight into
//! [`BookingRequest`] so that each rejection maps to its exact client message.
//! Presence uses truthiness: absent, `null`, `false`, `0` and `""` all count as
//! missing. Whitespace is not trimmed here, so `"  "` passes and is normalized later.

use common::model::booking::{BookingRequest, TestItem};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Missing required fields: name, address, contact, and tests are required.")]
    MissingFields,
    #[error("At least one test is required.")]
    NoTests,
}

/// Parses and validates a raw request body.
///
/// A body that is empty, malformed or not a JSON object is treated as an object
/// with no fields.
pub fn parse_request(body: &[u8]) -> Result<BookingRequest, Rejection> {
    let empty = Map::new();
    let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    let fields = value.as_object().unwrap_or(&empty);

    let name = required_text(fields, "name");
    let address = required_text(fields, "address");
    let contact = required_text(fields, "contact");
    let tests = fields
        .get("tests")
        .filter(|v| is_truthy(v))
        .and_then(Value::as_array);

    let (Some(name), Some(address), Some(contact), Some(tests)) = (name, address, contact, tests)
    else {
        return Err(Rejection::MissingFields);
    };

    if tests.is_empty() {
        return Err(Rejection::NoTests);
    }

    Ok(BookingRequest {
        name,
        address,
        contact,
        tests: tests.iter().map(test_item).collect(),
    })
}

/// A truthy field that is not a string cannot become a name, so it counts as missing.
fn required_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .filter(|v| is_truthy(v))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn test_item(value: &Value) -> TestItem {
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
    TestItem {
        name: text("name"),
        description: text("description"),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
