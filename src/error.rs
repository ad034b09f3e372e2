//! Error types for destination-kit
//!
//! This module defines the error hierarchy for the entire kit.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for destination-kit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Settings Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required settings field: {field}")]
    MissingSettingsField { field: String },

    #[error("Invalid settings value for '{field}': {message}")]
    InvalidSettingsValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Delivery Errors
    // ============================================================================
    /// The remote endpoint accepted the request at the transport level but
    /// reported a failure in its response body. Always carries status 400,
    /// regardless of the transport status code.
    #[error("{message}")]
    RemoteRejection { message: String, status: u16 },

    #[error("Invalid event timestamp: {value}")]
    InvalidTimestamp { value: String },

    #[error("Cannot build an insert statement from an empty batch")]
    EmptyBatch,

    #[error("Unknown destination: {slug}")]
    UnknownDestination { slug: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing settings field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingSettingsField {
            field: field.into(),
        }
    }

    /// Create an invalid settings value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSettingsValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a remote rejection. The status is fixed at 400: the remote side
    /// told us the request was bad, whatever the transport said.
    pub fn remote_rejection(message: impl Into<String>) -> Self {
        Self::RemoteRejection {
            message: message.into(),
            status: 400,
        }
    }

    /// The HTTP status associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } | Error::RemoteRejection { status, .. } => {
                Some(*status)
            }
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for destination-kit
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("api_key");
        assert_eq!(err.to_string(), "Missing required settings field: api_key");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_remote_rejection_is_always_400() {
        let err = Error::remote_rejection("Failed to insert data: table not found");
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("table not found"));
    }

    #[test]
    fn test_status_absent_for_local_errors() {
        assert_eq!(Error::config("x").status(), None);
        assert_eq!(Error::EmptyBatch.status(), None);
    }
}
