//! StackAdapt destination
//!
//! Syncs audience profiles into StackAdapt through its GraphQL API. This
//! module carries the advertiser dynamic-field lookup, the identifier
//! hashing helper, and the scalar-escaping encoder used to embed mapping
//! structures inside GraphQL query bodies.

mod encode;


pub use encode::{gql_enum_json, stringify_with_escaped_quotes};

use crate::destination::Destination;
use crate::error::Result;
use crate::fields::{validate_settings, AuthSpec, DestinationMetadata, FieldSpec};
use crate::http::{RequestClient, RequestConfig};
use crate::types::{Choice, DynamicFieldResponse, JsonValue};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::warn;

/// The StackAdapt GraphQL endpoint
pub const GQL_ENDPOINT: &str = "https://api.stackadapt.com/graphql";

/// External-provider tag attached to synced profiles
pub const EXTERNAL_PROVIDER: &str = "segmentio";

// ============================================================================
// Token introspection types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Advertiser {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdvertiserScopes {
    advertiser: Advertiser,
    scopes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScopesByAdvertiser {
    nodes: Vec<AdvertiserScopes>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfo {
    scopes_by_advertiser: ScopesByAdvertiser,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfoData {
    token_info: TokenInfo,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenInfoResponse {
    data: TokenInfoData,
}

const TOKEN_INFO_QUERY: &str = "query {
  tokenInfo {
    scopesByAdvertiser {
      nodes {
        advertiser {
          id
          name
        }
        scopes
      }
    }
  }
}";

// ============================================================================
// Advertiser lookup
// ============================================================================

async fn query_token_info(client: &RequestClient, url: &str) -> Result<TokenInfoResponse> {
    client
        .post_json(
            url,
            RequestConfig::new().json(json!({ "query": TOKEN_INFO_QUERY })),
        )
        .await
}

/// Fetch the advertisers this token may write to, as a dynamic choice list
///
/// Keeps advertisers carrying a `WRITE` scope, sorted ascending by display
/// name (case-insensitively). Fails open: any transport or parse failure
/// yields empty choices plus a structured error, never a raised error, so
/// configuration UI survives transient lookup failures.
///
/// Authorization is expected on the client's default headers; the platform
/// dispatcher injects it.
pub async fn fetch_advertisers(client: &RequestClient) -> DynamicFieldResponse {
    fetch_advertisers_from(client, GQL_ENDPOINT).await
}

/// [`fetch_advertisers`] against an explicit endpoint URL
pub async fn fetch_advertisers_from(client: &RequestClient, url: &str) -> DynamicFieldResponse {
    match query_token_info(client, url).await {
        Ok(response) => {
            let mut choices: Vec<Choice> = response
                .data
                .token_info
                .scopes_by_advertiser
                .nodes
                .into_iter()
                .filter(|entry| entry.scopes.iter().any(|s| s == "WRITE"))
                .map(|entry| Choice {
                    value: entry.advertiser.id,
                    label: entry.advertiser.name,
                })
                .collect();
            choices.sort_by(|a, b| {
                a.label
                    .to_lowercase()
                    .cmp(&b.label.to_lowercase())
                    .then_with(|| a.label.cmp(&b.label))
            });
            DynamicFieldResponse::ok(choices)
        }
        Err(error) => {
            warn!("advertiser lookup failed: {error}");
            let code = error
                .status()
                .map_or_else(|| "Unknown error".to_string(), |s| s.to_string());
            DynamicFieldResponse::fail(error.to_string(), code)
        }
    }
}

// ============================================================================
// Identifier hashing
// ============================================================================

/// Hex SHA-256 of a user identifier
pub fn sha256_hash(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// Destination
// ============================================================================

/// The StackAdapt destination module
pub struct StackAdapt;

#[async_trait]
impl Destination for StackAdapt {
    fn metadata(&self) -> DestinationMetadata {
        DestinationMetadata::cloud("StackAdapt Audiences", "stackadapt")
    }

    fn authentication(&self) -> AuthSpec {
        AuthSpec::custom([(
            "apiKey",
            FieldSpec::required("GraphQL Token", "The GraphQL API token for your StackAdapt account.")
                .password(),
        )])
    }

    /// Verify the token by running the introspection query
    async fn test_authentication(
        &self,
        client: &RequestClient,
        settings: &JsonValue,
    ) -> Result<()> {
        let validated = validate_settings(&self.authentication(), settings)?;
        let api_key = validated
            .get("apiKey")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();

        let _: TokenInfoResponse = client
            .post_json(
                GQL_ENDPOINT,
                RequestConfig::new()
                    .header("Authorization", format!("Bearer {api_key}"))
                    .json(json!({ "query": TOKEN_INFO_QUERY })),
            )
            .await?;
        Ok(())
    }
}
