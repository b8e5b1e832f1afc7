//! Search backend trait definition
//!
//! This trait defines the capability the request adapter depends on.
//! Implementations can be found in the search-client crate.

use crate::error::Result;
use async_trait::async_trait;

pub use super::search_models::*;

/// Anything that can turn query text into an ordered list of results
///
/// Implementations are created once per process and shared between request
/// handlers, so they must be safe for concurrent use.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run `text` against the backend index
    ///
    /// The backend applies its own page-size cap. Failures of any kind are
    /// reported as [`crate::Error::BackendUnavailable`].
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>>;

    /// Short provider name used in health output and logs
    fn name(&self) -> &str;
}
