//! Common types used throughout destination-kit
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Event Types
// ============================================================================

/// The kind of customer-data event being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Track,
    Identify,
    Page,
    Screen,
    Group,
    Alias,
}

impl EventType {
    /// The lowercase wire name of this event type
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Track => "track",
            EventType::Identify => "identify",
            EventType::Page => "page",
            EventType::Screen => "screen",
            EventType::Group => "group",
            EventType::Alias => "alias",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized customer-data event
///
/// At least one of `user_id`/`anonymous_id` is expected by convention, but
/// that invariant is enforced upstream, not by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Unique message identifier
    pub message_id: String,

    /// ISO-8601 event timestamp
    pub timestamp: String,

    /// Event kind
    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Event name (track events)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    /// Page/screen name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form event properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonValue>,

    /// Free-form user traits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<JsonValue>,

    /// Free-form event context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<JsonValue>,

    /// Known user identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Anonymous identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous_id: Option<String>,

    /// Group identifier (group events)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

// ============================================================================
// Dynamic Field Types
// ============================================================================

/// One selectable option in a dynamic configuration field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The value submitted when this option is chosen
    pub value: String,
    /// Human-readable label
    pub label: String,
}

/// Structured error reported by a dynamic field lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFieldError {
    /// Error message
    pub message: String,
    /// Error code, usually the HTTP status as a string
    pub code: String,
}

/// Result of a dynamic configuration field lookup
///
/// Lookups fail open: on any error the response carries empty choices plus a
/// structured error object, and is never raised to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFieldResponse {
    /// Available options
    pub choices: Vec<Choice>,

    /// Pagination cursor, empty when exhausted
    #[serde(default, rename = "nextPage", skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,

    /// Error details when the lookup failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DynamicFieldError>,
}

impl DynamicFieldResponse {
    /// A successful lookup result
    pub fn ok(choices: Vec<Choice>) -> Self {
        Self {
            choices,
            next_page: None,
            error: None,
        }
    }

    /// A failed lookup result: empty choices plus error details
    pub fn fail(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            choices: Vec::new(),
            next_page: Some(String::new()),
            error: Some(DynamicFieldError {
                message: message.into(),
                code: code.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_type_wire_names() {
        assert_eq!(EventType::Track.as_str(), "track");
        assert_eq!(EventType::Identify.as_str(), "identify");
        assert_eq!(
            serde_json::to_value(EventType::Group).unwrap(),
            json!("group")
        );
    }

    #[test]
    fn test_event_record_deserializes_camel_case() {
        let record: EventRecord = serde_json::from_value(json!({
            "messageId": "msg-1",
            "timestamp": "2024-01-15T10:30:00.000Z",
            "type": "track",
            "event": "Order Completed",
            "userId": "u-1",
            "properties": {"total": 42.5}
        }))
        .unwrap();

        assert_eq!(record.message_id, "msg-1");
        assert_eq!(record.event_type, EventType::Track);
        assert_eq!(record.event.as_deref(), Some("Order Completed"));
        assert_eq!(record.user_id.as_deref(), Some("u-1"));
        assert!(record.anonymous_id.is_none());
        assert!(record.traits.is_none());
    }

    #[test]
    fn test_dynamic_field_response_fail() {
        let response = DynamicFieldResponse::fail("boom", "500");
        assert!(response.choices.is_empty());
        assert_eq!(response.error.as_ref().unwrap().message, "boom");
        assert_eq!(response.error.as_ref().unwrap().code, "500");
    }
}
