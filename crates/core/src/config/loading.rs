//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::collections::HashMap;
use std::path::Path;

use super::defaults::*;
use super::{local_config_path, Config};

type Builder = LibConfigBuilder<config::builder::DefaultState>;

/// Environment variables kept for deployments that predate the NEUTRINO_ prefix
const LEGACY_ENV_OVERRIDES: [(&str, &str); 3] = [
    ("AZURE_SEARCH_ENDPOINT", "search.endpoint"),
    ("AZURE_SEARCH_INDEX", "search.index_name"),
    ("AZURE_SEARCH_API_KEY", "search.api_key"),
];

/// String-typed keys that must keep their raw text even when it looks numeric
const VERBATIM_ENV_KEYS: [(&str, &str); 6] = [
    ("NEUTRINO_SEARCH__PROVIDER", "search.provider"),
    ("NEUTRINO_SEARCH__ENDPOINT", "search.endpoint"),
    ("NEUTRINO_SEARCH__INDEX_NAME", "search.index_name"),
    ("NEUTRINO_SEARCH__API_KEY", "search.api_key"),
    ("NEUTRINO_SEARCH__API_VERSION", "search.api_version"),
    ("NEUTRINO_SERVER__HOST", "server.host"),
];

fn env_value(env: &Option<HashMap<String, String>>, var: &str) -> Option<String> {
    match env {
        Some(map) => map.get(var).cloned(),
        None => std::env::var(var).ok(),
    }
}

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: Builder,
    key: &str,
    value: T,
) -> Result<Builder> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `NEUTRINO_` and use double underscores
    /// for nested values. For example:
    /// - `NEUTRINO_SEARCH__PAGE_SIZE=10`
    /// - `NEUTRINO_SERVER__PORT=9000`
    ///
    /// `AZURE_SEARCH_ENDPOINT`, `AZURE_SEARCH_INDEX` and `AZURE_SEARCH_API_KEY`
    /// are honored last.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_env(path, None)
    }

    /// Same as [`Config::from_file`], reading variables from `env` instead of
    /// the process environment when it is given
    pub fn from_file_with_env(path: &Path, env: Option<HashMap<String, String>>) -> Result<Self> {
        let builder = ConfigLib::builder();

        let builder = set_config_default(builder, "search.provider", default_search_provider())?;
        let builder = set_config_default(builder, "search.api_version", default_api_version())?;
        let builder =
            set_config_default(builder, "search.page_size", default_page_size() as i64)?;
        let builder = set_config_default(
            builder,
            "search.timeout_secs",
            default_search_timeout_secs() as i64,
        )?;
        let builder = set_config_default(builder, "server.host", default_server_host())?;
        let mut builder =
            set_config_default(builder, "server.port", i64::from(default_server_port()))?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with NEUTRINO_ prefix
        builder = builder.add_source(
            Environment::with_prefix("NEUTRINO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env.clone()),
        );

        // try_parsing turns "007" into 7; restore the raw text for string keys
        for (var, key) in VERBATIM_ENV_KEYS.into_iter().chain(LEGACY_ENV_OVERRIDES) {
            if let Some(value) = env_value(&env, var) {
                builder = builder
                    .set_override(key, value)
                    .map_err(|e| Error::config(format!("Failed to set {var}: {e}")))?;
            }
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (./neutrino.toml or custom --config path)
    /// 3. Environment variables (NEUTRINO_*)
    /// 4. AZURE_SEARCH_* variables
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => local_config_path()?,
        };
        Self::from_file(&path)
    }
}
