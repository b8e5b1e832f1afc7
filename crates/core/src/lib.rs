//! Core types and traits for the neutrino search façade
//!
//! This crate provides the foundational abstractions shared by the search
//! client and the REST server:
//!
//! - **Configuration**: backend and server settings, loaded from TOML and env
//! - **Search models**: normalized queries, retrieval modes and result records
//! - **Search backend**: the capability trait every backend implements
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;
pub mod search_api;
pub mod search_models;

// Re-export main types for convenience
pub use config::{Config, SearchBackendConfig, ServerConfig};
pub use error::{Error, Result, ResultExt};
pub use search_api::SearchBackend;
pub use search_models::{RetrievalMode, SearchQuery, SearchResult, DEFAULT_TOP_K};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, ResultExt};
    pub use crate::search_api::SearchBackend;
    pub use crate::search_models::{SearchQuery, SearchResult};
}
