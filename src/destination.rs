//! Destination trait
//!
//! A destination is a self-contained adapter: it declares its settings
//! fields, can verify credentials, and exposes actions that turn event
//! batches into outbound API calls.

use crate::error::Result;
use crate::fields::{AuthSpec, DestinationMetadata};
use crate::http::RequestClient;
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a credential check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// A connector module targeting one third-party API
#[async_trait]
pub trait Destination: Send + Sync {
    /// Identity of this destination
    fn metadata(&self) -> DestinationMetadata;

    /// Authentication scheme and settings fields
    fn authentication(&self) -> AuthSpec;

    /// Verify the supplied settings against the remote API
    async fn test_authentication(
        &self,
        client: &RequestClient,
        settings: &JsonValue,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result() {
        let ok = CheckResult::success();
        assert!(ok.success);
        assert!(ok.message.is_none());

        let failed = CheckResult::failure("bad credentials");
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("bad credentials"));
    }
}
