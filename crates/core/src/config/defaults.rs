//! Default values and functions for configuration

// Default constants
pub(crate) const CONFIG_FILE_NAME: &str = "neutrino.toml";
pub(crate) const DEFAULT_SEARCH_PROVIDER: &str = "azure";
pub const DEFAULT_API_VERSION: &str = "2023-11-01";
pub(crate) const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub(crate) const MAX_PAGE_SIZE: usize = 1000;

/// Search providers understood by the backend factory
pub const VALID_PROVIDERS: [&str; 2] = ["azure", "mock"];

pub(crate) fn default_search_provider() -> String {
    DEFAULT_SEARCH_PROVIDER.to_string()
}

pub(crate) fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

pub(crate) fn default_page_size() -> usize {
    5
}

pub(crate) fn default_search_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_server_host() -> String {
    DEFAULT_SERVER_HOST.to_string()
}

pub(crate) fn default_server_port() -> u16 {
    8080
}

pub(crate) fn default_allowed_origins() -> Vec<String> {
    Vec::new() // Empty by default = CORS disabled
}
