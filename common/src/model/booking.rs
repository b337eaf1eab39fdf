//! Booking data model.
//!
//! A booking travels through three shapes:
//!
//! 1. [`TestItem`] / [`BookingRequest`]: what the intake endpoint accepted after the
//!    field-presence and non-empty-tests checks. Values are still untrimmed and each
//!    test item may lack a name or description.
//! 2. [`TestEntry`]: a test item with both fields coerced to trimmed strings.
//! 3. [`BookingRecord`]: the document written to the store, stamped with a creation
//!    time and the initial `pending` status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A requested test as received from the client.
///
/// Fields that were absent, `null` or not strings are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestItem {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A requested test as persisted. Both fields are trimmed and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestEntry {
    pub name: String,
    pub description: String,
}

impl From<TestItem> for TestEntry {
    fn from(item: TestItem) -> Self {
        TestEntry {
            name: trim_or_empty(item.name),
            description: trim_or_empty(item.description),
        }
    }
}

fn trim_or_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// A booking submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub tests: Vec<TestItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
}

/// The document stored for every accepted booking. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookingRecord {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub tests: Vec<TestEntry>,
    pub timestamp: DateTime<Utc>,
    pub status: BookingStatus,
}

impl BookingRecord {
    /// Normalizes a validated request into a record created at `timestamp`.
    pub fn new(request: BookingRequest, timestamp: DateTime<Utc>) -> Self {
        BookingRecord {
            name: request.name.trim().to_string(),
            address: request.address.trim().to_string(),
            contact: request.contact.trim().to_string(),
            tests: request.tests.into_iter().map(TestEntry::from).collect(),
            timestamp,
            status: BookingStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(tests: Vec<TestItem>) -> BookingRequest {
        BookingRequest {
            name: " Alice ".to_string(),
            address: "\t1 Main St\n".to_string(),
            contact: "555-1234 ".to_string(),
            tests,
        }
    }

    #[test]
    fn record_trims_top_level_fields_and_starts_pending() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let record = BookingRecord::new(request(vec![TestItem::default()]), at);

        assert_eq!(record.name, "Alice");
        assert_eq!(record.address, "1 Main St");
        assert_eq!(record.contact, "555-1234");
        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.timestamp, at);
    }

    #[test]
    fn missing_test_fields_become_empty_strings() {
        let entry = TestEntry::from(TestItem {
            name: Some(" CBC ".to_string()),
            description: None,
        });
        assert_eq!(entry.name, "CBC");
        assert_eq!(entry.description, "");

        let entry = TestEntry::from(TestItem {
            name: None,
            description: Some("   ".to_string()),
        });
        assert_eq!(entry, TestEntry::default());
    }

    #[test]
    fn test_order_is_preserved() {
        let items = vec![
            TestItem { name: Some("B".into()), description: None },
            TestItem { name: Some("A".into()), description: None },
        ];
        let record = BookingRecord::new(request(items), Utc::now());
        let names: Vec<&str> = record.tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn record_serializes_status_lowercase() {
        let record = BookingRecord::new(request(vec![TestItem::default()]), Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json["timestamp"].is_string());
        assert_eq!(json["tests"][0]["name"], "");
    }
}
