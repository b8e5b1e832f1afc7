//! Search backend providers
//!
//! This crate provides the concrete implementations of
//! [`neutrino_core::SearchBackend`]: a client for a hosted Azure AI Search
//! index and an in-process mock used by tests and local runs.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use neutrino_core::config::SearchBackendConfig;
use neutrino_core::error::{Error, Result};
use neutrino_core::SearchBackend;
use std::sync::Arc;
use tracing::info;

mod azure;
pub mod error;
mod mock;

pub use azure::AzureSearchClient;
pub use error::SearchClientError;
pub use mock::MockSearchBackend;

/// Create the search backend selected by configuration
///
/// The returned handle is meant to be built once at startup and shared by
/// every request handler.
///
/// # Arguments
/// * `config` - Search backend configuration including provider type
pub fn create_search_backend(config: &SearchBackendConfig) -> Result<Arc<dyn SearchBackend>> {
    match config.provider.as_str() {
        "azure" => {
            let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                Error::config(
                    "Azure search endpoint required. Set search.endpoint or AZURE_SEARCH_ENDPOINT"
                        .to_string(),
                )
            })?;
            let index_name = config.index_name.clone().ok_or_else(|| {
                Error::config(
                    "Azure search index required. Set search.index_name or AZURE_SEARCH_INDEX"
                        .to_string(),
                )
            })?;
            let api_key = config
                .api_key
                .clone()
                .or_else(|| std::env::var("AZURE_SEARCH_API_KEY").ok())
                .ok_or_else(|| {
                    Error::config(
                        "Azure search API key required. Set search.api_key or AZURE_SEARCH_API_KEY env var"
                            .to_string(),
                    )
                })?;

            info!("Creating Azure AI Search backend");
            let client = AzureSearchClient::new(
                endpoint,
                index_name,
                api_key,
                &config.api_version,
                config.page_size,
                config.timeout_secs,
            )?;

            Ok(Arc::new(client))
        }
        "mock" => {
            info!("Creating mock search backend");
            Ok(Arc::new(MockSearchBackend::new(Vec::new(), config.page_size)))
        }
        other => Err(Error::config(format!(
            "Unknown search provider: '{other}'. Valid providers: azure, mock"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mock_backend() -> Result<()> {
        let config = SearchBackendConfig {
            provider: "mock".to_string(),
            ..SearchBackendConfig::default()
        };

        let backend = create_search_backend(&config)?;
        assert_eq!(backend.name(), "mock");
        Ok(())
    }

    #[test]
    fn test_create_azure_backend_with_key() -> Result<()> {
        let config = SearchBackendConfig {
            endpoint: Some("https://svc.search.windows.net".to_string()),
            index_name: Some("kbidx".to_string()),
            api_key: Some("key".to_string()),
            ..SearchBackendConfig::default()
        };

        let backend = create_search_backend(&config)?;
        assert_eq!(backend.name(), "azure");
        Ok(())
    }

    #[test]
    fn test_create_azure_backend_requires_endpoint() {
        let config = SearchBackendConfig {
            index_name: Some("kbidx".to_string()),
            api_key: Some("key".to_string()),
            ..SearchBackendConfig::default()
        };

        let err = create_search_backend(&config).err().map(|e| e.to_string());
        assert!(err.is_some_and(|msg| msg.contains("endpoint")));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = SearchBackendConfig {
            provider: "solr".to_string(),
            ..SearchBackendConfig::default()
        };

        let err = create_search_backend(&config).err().map(|e| e.to_string());
        assert!(err.is_some_and(|msg| msg.contains("Unknown search provider")));
    }
}
