//! Request client
//!
//! Wraps `reqwest` with default headers, a timeout, and JSON body handling.
//! The `throw_http_errors` flag mirrors the platform dispatcher contract:
//! when set, non-2xx responses are raised as errors; when cleared, the body
//! is handed back for the destination to interpret (the SingleStore exec
//! endpoint reports failures in the body with a 200 transport status).

use crate::error::{Error, Result};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the request client
#[derive(Debug, Clone)]
pub struct RequestClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for RequestClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("destination-kit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RequestClientConfig {
    /// Create a new config builder
    pub fn builder() -> RequestClientConfigBuilder {
        RequestClientConfigBuilder::default()
    }
}

/// Builder for request client config
#[derive(Default)]
pub struct RequestClientConfigBuilder {
    config: RequestClientConfig,
}

impl RequestClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> RequestClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Raise non-2xx responses as errors
    pub throw_http_errors: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            body: None,
            throw_http_errors: true,
        }
    }
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Hand non-2xx response bodies back instead of raising
    #[must_use]
    pub fn no_throw_http_errors(mut self) -> Self {
        self.throw_http_errors = false;
        self
    }
}

/// JSON-over-HTTPS request client
pub struct RequestClient {
    client: Client,
    config: RequestClientConfig,
}

impl RequestClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(RequestClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: RequestClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::POST, url, config).await
    }

    /// Make a POST request and parse the JSON response body
    ///
    /// With `throw_http_errors` cleared the body is parsed regardless of the
    /// transport status code.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(Method::POST, url, config).await?;
        let data: T = response.json().await.map_err(Error::Http)?;
        Ok(data)
    }

    /// Make a generic request
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let mut req = self.client.request(method.clone(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(Error::Http)?;
        let status = response.status();
        debug!("{} {} -> {}", method, url, status);

        if config.throw_http_errors && !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl Default for RequestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
