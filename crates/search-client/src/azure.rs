//! Azure AI Search backend
//!
//! Talks to the hosted index through its REST query API:
//! `POST {endpoint}/indexes/{index}/docs/search?api-version={version}`.

use crate::error::SearchClientError;
use async_trait::async_trait;
use neutrino_core::error::Result;
use neutrino_core::{SearchBackend, SearchResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Request payload for the documents search API
#[derive(Debug, Serialize)]
struct AzureSearchRequest<'a> {
    search: &'a str,
    top: usize,
}

/// Response from the documents search API
#[derive(Debug, Deserialize)]
struct AzureSearchResponse {
    #[serde(default)]
    value: Vec<SearchResult>,
}

/// Client for an Azure AI Search index
pub struct AzureSearchClient {
    client: Client,
    search_url: String,
    index_name: String,
    api_key: String,
    page_size: usize,
}

impl AzureSearchClient {
    /// Create a new Azure AI Search client
    ///
    /// # Arguments
    /// * `endpoint` - Service URL, e.g. `https://<service>.search.windows.net`
    /// * `index_name` - Index every query runs against
    /// * `api_key` - Query or admin key sent in the `api-key` header
    /// * `api_version` - REST API version
    /// * `page_size` - Maximum results requested per query
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(
        endpoint: &str,
        index_name: String,
        api_key: String,
        api_version: &str,
        page_size: usize,
        timeout_secs: u64,
    ) -> Result<Self> {
        info!("Initializing Azure AI Search client");
        info!("  Endpoint: {endpoint}");
        info!("  Index: {index_name}");
        info!("  Page size: {page_size}");
        info!("  Timeout: {timeout_secs}s");

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SearchClientError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            search_url: search_url(endpoint, &index_name, api_version),
            index_name,
            api_key,
            page_size,
        })
    }

    /// Index this client queries
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Full URL of the documents search operation
    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

fn search_url(endpoint: &str, index_name: &str, api_version: &str) -> String {
    format!(
        "{}/indexes/{}/docs/search?api-version={}",
        endpoint.trim_end_matches('/'),
        index_name,
        api_version
    )
}

#[async_trait]
impl SearchBackend for AzureSearchClient {
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>> {
        debug!("Azure search: '{text}' (top {})", self.page_size);

        let request = AzureSearchRequest {
            search: text,
            top: self.page_size,
        };

        let response = self
            .client
            .post(&self.search_url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connection"
                } else if e.is_request() {
                    "request build"
                } else if e.is_body() {
                    "body"
                } else {
                    "unknown"
                };
                warn!("Azure search request failed ({kind}): {e}");
                SearchClientError::Transport {
                    kind,
                    message: e.to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            warn!("Azure search API error {status}: {body}");
            return Err(SearchClientError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let search_response: AzureSearchResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Azure search response: {e}");
            SearchClientError::Decode(e.to_string())
        })?;

        debug!(
            "Azure search returned {} results",
            search_response.value.len()
        );

        Ok(search_response.value)
    }

    fn name(&self) -> &str {
        "azure"
    }
}
