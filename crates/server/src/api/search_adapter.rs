//! Search request adapter
//!
//! Turns the loosely typed `POST /search` body into a validated
//! [`SearchQuery`] and hands it to the configured search backend.

use super::models::{ListParam, Param, SearchRequest};
use neutrino_core::error::{Error, Result};
use neutrino_core::{RetrievalMode, SearchBackend, SearchQuery, SearchResult, DEFAULT_TOP_K};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

const LIST_SHAPE_ERROR: &str = "expected a string or list of strings";

/// Validates search requests and dispatches them to a backend
pub struct SearchRequestAdapter {
    backend: Arc<dyn SearchBackend>,
    default_index: Option<String>,
}

impl SearchRequestAdapter {
    /// Create an adapter over `backend`
    ///
    /// `default_index` is used for requests that do not name an index.
    pub fn new(backend: Arc<dyn SearchBackend>, default_index: Option<String>) -> Self {
        Self {
            backend,
            default_index,
        }
    }

    /// Name of the backend provider
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Build a query from a request body using this adapter's default index
    pub fn build_query(&self, request: SearchRequest) -> Result<SearchQuery> {
        build_query(request, self.default_index.as_deref())
    }

    /// Run a validated query against the backend
    ///
    /// Only `query.text` is forwarded; the backend applies its own fixed page
    /// size. The remaining fields are logged but not sent, so `top_k`, the
    /// filter lists, `expert_name`, `retrieval_mode` and `index_name` do not
    /// change the results yet.
    pub async fn execute(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        info!(
            "Searching for '{}' in index '{}' with top_k={}, type={:?}, module_orgs={:?}, \
             derivatives={:?}, build_phases={:?}, expert_name={:?}, retrieval_mode={}",
            query.text,
            query.index_name.as_deref().unwrap_or("<none>"),
            query.top_k,
            query.result_type,
            query.module_orgs,
            query.derivatives,
            query.build_phases,
            query.expert_name,
            query.retrieval_mode,
        );

        self.backend
            .search(&query.text)
            .await
            .map_err(|e| match e {
                Error::BackendUnavailable(_) => e,
                other => Error::backend_unavailable(other.to_string()),
            })
    }

    /// Validate `request` and run it
    pub async fn search(&self, request: SearchRequest) -> Result<Vec<SearchResult>> {
        let query = self.build_query(request)?;
        self.execute(&query).await
    }
}

/// Parse a filter list parameter
///
/// Absent stays absent; a list is kept as-is; a string is split on `,` with
/// no trimming and no dropping of empty segments. Any other shape is an
/// [`Error::InvalidArgument`].
pub fn parse_list_field(name: &str, raw: Option<ListParam>) -> Result<Option<Vec<String>>> {
    match raw {
        None => Ok(None),
        Some(ListParam::List(items)) => Ok(Some(items)),
        Some(ListParam::Csv(joined)) => Ok(Some(joined.split(',').map(str::to_string).collect())),
        Some(ListParam::Invalid(value)) => Err(Error::invalid_argument(format!(
            "'{name}': {LIST_SHAPE_ERROR}, got {}",
            json_type_name(&value)
        ))),
    }
}

/// Build a [`SearchQuery`] from a request body
///
/// No network call is made here.
pub fn build_query(request: SearchRequest, default_index: Option<&str>) -> Result<SearchQuery> {
    let text = match request.query {
        Some(Param::Valid(text)) => text,
        None | Some(Param::Invalid(_)) => return Err(Error::missing_parameter("query")),
    };
    if text.trim().is_empty() {
        return Err(Error::invalid_argument("'query' must not be empty"));
    }

    let top_k = coerce_top_k(request.top_k)?;
    let result_type = optional_string("type", request.result_type)?;
    let expert_name = optional_string("expert_name", request.expert_name)?;
    let index_name = optional_string("index_name", request.index_name)?
        .or_else(|| default_index.map(str::to_string));

    let module_orgs = parse_list_field("module_orgs", request.module_orgs)?;
    let derivatives = parse_list_field("derivatives", request.derivatives)?;
    let build_phases = parse_list_field("build_phases", request.build_phases)?;

    let retrieval_mode = match optional_string("retrieval_mode", request.retrieval_mode)? {
        None => RetrievalMode::default(),
        Some(mode) => RetrievalMode::from_str(&mode).map_err(|_| {
            Error::invalid_argument(format!(
                "'retrieval_mode' must be one of TEXT, VECTOR, HYBRID, got '{mode}'"
            ))
        })?,
    };

    Ok(SearchQuery {
        text,
        top_k,
        result_type,
        module_orgs,
        derivatives,
        build_phases,
        expert_name,
        retrieval_mode,
        index_name,
    })
}

fn coerce_top_k(raw: Option<Param<f64>>) -> Result<usize> {
    match raw {
        None => Ok(DEFAULT_TOP_K),
        Some(Param::Valid(n)) if n >= 0.0 => Ok(n.trunc() as usize),
        Some(Param::Valid(n)) => Err(Error::invalid_argument(format!(
            "'top_k' must not be negative, got {n}"
        ))),
        Some(Param::Invalid(value)) => Err(Error::invalid_argument(format!(
            "'top_k' must be a number, got {}",
            json_type_name(&value)
        ))),
    }
}

fn optional_string(name: &str, raw: Option<Param<String>>) -> Result<Option<String>> {
    match raw {
        None => Ok(None),
        Some(Param::Valid(value)) => Ok(Some(value)),
        Some(Param::Invalid(value)) => Err(Error::invalid_argument(format!(
            "'{name}' must be a string, got {}",
            json_type_name(&value)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
