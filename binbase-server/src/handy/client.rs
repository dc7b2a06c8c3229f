//! HandyAPI HTTP client.
//!
//! Makes a single best-effort request per lookup. There are no retries and
//! no timeout beyond the HTTP client's defaults.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::domain::{Bin, LookupResult};
use crate::lookup::RemoteLookup;

use super::convert::to_lookup_result;
use super::error::HandyError;
use super::types::HandyResponse;

/// Default base URL for HandyAPI.
pub const DEFAULT_BASE_URL: &str = "https://data.handyapi.com";

/// Configuration for the HandyAPI client.
#[derive(Debug, Clone)]
pub struct HandyConfig {
    /// Base URL for the API (defaults to production HandyAPI)
    pub base_url: String,
    /// Optional API key, sent as a bearer token
    pub api_key: Option<String>,
}

impl HandyConfig {
    /// Create a config pointing at the production API without a key.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl Default for HandyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HandyAPI client.
#[derive(Debug, Clone)]
pub struct HandyClient {
    http: reqwest::Client,
    base_url: String,
}

impl HandyClient {
    /// Create a new client with the given configuration.
    pub fn new(config: HandyConfig) -> Result<Self, HandyError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| HandyError::NotConfigured("invalid API key format".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the raw provider response for a BIN.
    ///
    /// Returns `Ok(None)` when the provider reports the BIN as unknown.
    pub async fn fetch(&self, bin: Bin) -> Result<Option<HandyResponse>, HandyError> {
        let url = format!("{}/bin/{}", self.base_url, bin);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HandyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: HandyResponse = serde_json::from_str(&body).map_err(|e| HandyError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        if parsed.is_not_found() {
            return Ok(None);
        }

        Ok(Some(parsed))
    }

    /// Look up a BIN and convert the response to a domain result.
    pub async fn lookup(&self, bin: Bin) -> Result<Option<LookupResult>, HandyError> {
        Ok(self.fetch(bin).await?.as_ref().map(to_lookup_result))
    }
}

#[async_trait]
impl RemoteLookup for HandyClient {
    async fn fetch_remote(&self, bin: Bin) -> Option<LookupResult> {
        match self.lookup(bin).await {
            Ok(Some(result)) => Some(result),
            Ok(None) => {
                tracing::debug!(%bin, "provider has no data for BIN");
                None
            }
            Err(e) => {
                tracing::warn!(%bin, error = %e, "provider lookup failed");
                None
            }
        }
    }
}
