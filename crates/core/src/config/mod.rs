//! Configuration module for the neutrino search façade
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::{DEFAULT_API_VERSION, VALID_PROVIDERS};

use defaults::*;

/// Returns the path of the configuration file used when none is given
///
/// This is `neutrino.toml` in the current working directory.
pub fn local_config_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| Error::config(format!("Unable to determine current directory: {e}")))?;
    Ok(cwd.join(CONFIG_FILE_NAME))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search backend configuration
    #[serde(default)]
    pub search: SearchBackendConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the hosted search backend
///
/// # Providers
/// - `azure` (default): Azure AI Search REST API, uses AZURE_SEARCH_API_KEY env var
/// - `mock`: canned in-process results for testing
#[derive(Clone, Serialize, Deserialize)]
pub struct SearchBackendConfig {
    /// Provider type: "azure" (default), "mock"
    #[serde(default = "default_search_provider")]
    pub provider: String,

    /// Service endpoint, e.g. `https://<service>.search.windows.net`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Index queried by the backend, also the default for requests that name none
    #[serde(default)]
    pub index_name: Option<String>,

    /// Query key for the service (or use AZURE_SEARCH_API_KEY env var)
    #[serde(default)]
    pub api_key: Option<String>,

    /// REST API version sent with every request
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Maximum number of results the backend returns per query
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SearchBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBackendConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("index_name", &self.index_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "***REDACTED***"))
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for SearchBackendConfig {
    fn default() -> Self {
        Self {
            provider: default_search_provider(),
            endpoint: None,
            index_name: None,
            api_key: None,
            api_version: default_api_version(),
            page_size: default_page_size(),
            timeout_secs: default_search_timeout_secs(),
        }
    }
}

/// Configuration for the REST server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = disabled, ["*"] = all origins)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;

        if !VALID_PROVIDERS.contains(&search.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid search provider '{}'. Must be one of: {:?}",
                search.provider, VALID_PROVIDERS
            )));
        }

        if search.provider == "azure" {
            let endpoint = search.endpoint.as_deref().ok_or_else(|| {
                Error::config(
                    "search.endpoint is required for the azure provider. \
                     Set it in the config file or via AZURE_SEARCH_ENDPOINT"
                        .to_string(),
                )
            })?;
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(Error::config(format!(
                    "search.endpoint must start with http:// or https:// (got '{endpoint}')"
                )));
            }
            if search.index_name.as_deref().map_or(true, str::is_empty) {
                return Err(Error::config(
                    "search.index_name is required for the azure provider. \
                     Set it in the config file or via AZURE_SEARCH_INDEX"
                        .to_string(),
                ));
            }
        }

        if search.page_size == 0 || search.page_size > MAX_PAGE_SIZE {
            return Err(Error::config(format!(
                "search.page_size must be between 1 and {MAX_PAGE_SIZE} (got {})",
                search.page_size
            )));
        }

        if search.timeout_secs == 0 {
            return Err(Error::config(
                "search.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
