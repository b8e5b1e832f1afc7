//! Search query and result models
//!
//! These types form the contract between the request adapter, the REST layer
//! and whichever backend serves the query.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Number of results requested when the caller does not say otherwise
pub const DEFAULT_TOP_K: usize = 5;

/// Ranking strategy a query asks the backend to use
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum RetrievalMode {
    /// Keyword / full-text ranking
    #[default]
    Text,
    /// Embedding similarity ranking
    Vector,
    /// Text and vector scores fused
    Hybrid,
}

/// A validated, normalized search query built from one inbound request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub top_k: usize,
    pub result_type: Option<String>,
    pub module_orgs: Option<Vec<String>>,
    pub derivatives: Option<Vec<String>>,
    pub build_phases: Option<Vec<String>>,
    pub expert_name: Option<String>,
    pub retrieval_mode: RetrievalMode,
    /// Index to query; falls back to the configured default index
    pub index_name: Option<String>,
}

impl SearchQuery {
    /// Creates a query for `text` with every optional field at its default
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            top_k: DEFAULT_TOP_K,
            result_type: None,
            module_orgs: None,
            derivatives: None,
            build_phases: None,
            expert_name: None,
            retrieval_mode: RetrievalMode::default(),
            index_name: None,
        }
    }
}

/// One document returned by the search backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub result_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub module_orgs: Vec<String>,
}

// Hosted indexes return `null` for unset fields
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
