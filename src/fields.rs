//! Declarative settings-field schemas for destinations
//!
//! Each destination declares the authentication/configuration fields it needs.
//! The schema drives UI rendering and settings validation; the values
//! themselves arrive as JSON per call.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Field Specs
// ============================================================================

/// The data type of a settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Plain string input
    #[default]
    String,
    /// Masked string input
    Password,
}

/// Declaration of a single settings field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Short human-readable label
    pub label: String,

    /// Longer description shown in configuration UI
    pub description: String,

    /// Field data type
    #[serde(default, rename = "type")]
    pub field_type: FieldType,

    /// Whether the field must be present
    #[serde(default)]
    pub required: bool,

    /// Default value applied when the field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldSpec {
    /// A required string field
    pub fn required(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            field_type: FieldType::String,
            required: true,
            default: None,
        }
    }

    /// An optional string field
    pub fn optional(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(label, description)
        }
    }

    /// Mark this field as a password
    #[must_use]
    pub fn password(mut self) -> Self {
        self.field_type = FieldType::Password;
        self
    }

    /// Set a default value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

// ============================================================================
// Authentication Spec
// ============================================================================

/// Authentication scheme of a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// Destination-specific credential fields
    #[default]
    Custom,
    /// OAuth2 bearer token supplied by the platform
    OAuth2,
}

/// Authentication declaration: scheme plus the fields it needs
///
/// Fields are ordered; `BTreeMap` keeps iteration deterministic for UI and
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSpec {
    /// Authentication scheme
    pub scheme: AuthScheme,

    /// Declared settings fields, keyed by field name
    pub fields: BTreeMap<String, FieldSpec>,
}

impl AuthSpec {
    /// A custom-scheme auth spec with the given fields
    pub fn custom(fields: impl IntoIterator<Item = (&'static str, FieldSpec)>) -> Self {
        Self {
            scheme: AuthScheme::Custom,
            fields: fields
                .into_iter()
                .map(|(name, spec)| (name.to_string(), spec))
                .collect(),
        }
    }
}

// ============================================================================
// Destination Metadata
// ============================================================================

/// Identity of a destination module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationMetadata {
    /// Human-readable name (e.g. "SingleStore")
    pub name: String,
    /// Unique slug (e.g. "singlestore")
    pub slug: String,
    /// Execution mode; always "cloud" for the built-ins
    pub mode: String,
}

impl DestinationMetadata {
    /// Cloud-mode metadata
    pub fn cloud(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            mode: "cloud".to_string(),
        }
    }
}

// ============================================================================
// Settings Validation
// ============================================================================

/// Validate raw settings against an auth spec
///
/// Checks that every required field is a present, non-empty string, and fills
/// in declared defaults for absent fields. Returns the validated object.
pub fn validate_settings(spec: &AuthSpec, settings: &JsonValue) -> Result<JsonObject> {
    let object = settings
        .as_object()
        .ok_or_else(|| Error::config("Settings must be a JSON object"))?;

    let mut validated = object.clone();

    for (name, field) in &spec.fields {
        let present = match validated.get(name) {
            Some(JsonValue::String(s)) => !s.is_empty(),
            Some(other) => {
                return Err(Error::invalid_value(
                    name,
                    format!("expected a string, got {other}"),
                ));
            }
            None => false,
        };

        if !present {
            if let Some(default) = &field.default {
                validated.insert(name.clone(), JsonValue::String(default.clone()));
            } else if field.required {
                return Err(Error::missing_field(name));
            }
        }
    }

    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn spec() -> AuthSpec {
        AuthSpec::custom([
            ("host", FieldSpec::required("Host", "The database host.")),
            (
                "port",
                FieldSpec::optional("Port", "The API port.").with_default("443"),
            ),
            (
                "password",
                FieldSpec::required("Password", "The password.").password(),
            ),
        ])
    }

    #[test]
    fn test_validate_settings_fills_defaults() {
        let validated = validate_settings(
            &spec(),
            &json!({"host": "db.example.com", "password": "hunter2"}),
        )
        .unwrap();
        assert_eq!(validated["port"], json!("443"));
        assert_eq!(validated["host"], json!("db.example.com"));
    }

    #[test]
    fn test_validate_settings_missing_required() {
        let err = validate_settings(&spec(), &json!({"host": "db.example.com"})).unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_validate_settings_rejects_non_string() {
        let err = validate_settings(
            &spec(),
            &json!({"host": 42, "password": "hunter2"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("host"));
    }

    #[test]
    fn test_validate_settings_rejects_non_object() {
        assert!(validate_settings(&spec(), &json!([1, 2, 3])).is_err());
    }
}
