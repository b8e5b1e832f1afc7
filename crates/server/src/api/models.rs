//! Request models for the search endpoint
//!
//! The search body is loosely typed: clients send numbers, strings, lists or
//! comma-separated strings for the same field. Each field decodes into a
//! variant that records which shape arrived, so validation is a plain match.

use neutrino_core::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// A scalar parameter that either has the expected type or not
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Param<T> {
    Valid(T),
    Invalid(Value),
}

/// A filter list parameter
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListParam {
    /// `["a", "b"]`
    List(Vec<String>),
    /// `"a,b"`
    Csv(String),
    /// Anything else: numbers, objects, booleans, lists of non-strings
    Invalid(Value),
}

/// Body of `POST /search`
///
/// JSON `null` and an absent field are treated the same.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Query text (required)
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub query: Option<Param<String>>,

    /// Number of results wanted, default 5
    #[serde(default)]
    #[schema(value_type = Option<u32>)]
    pub top_k: Option<Param<f64>>,

    /// Result type filter
    #[serde(default, rename = "type")]
    #[schema(value_type = Option<String>)]
    pub result_type: Option<Param<String>>,

    /// List of strings or a comma-separated string
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub module_orgs: Option<ListParam>,

    /// List of strings or a comma-separated string
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub derivatives: Option<ListParam>,

    /// List of strings or a comma-separated string
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub build_phases: Option<ListParam>,

    /// Expert name filter
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub expert_name: Option<Param<String>>,

    /// TEXT, VECTOR or HYBRID in any case, default TEXT
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub retrieval_mode: Option<Param<String>>,

    /// Index to query, defaults to the configured index
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub index_name: Option<Param<String>>,
}

impl SearchRequest {
    /// Decode a request body, which must be a JSON object
    ///
    /// Arrays and scalars are rejected rather than mapped onto fields by position.
    pub fn from_body(body: Value) -> Result<Self> {
        let Value::Object(fields) = body else {
            return Err(Error::invalid_argument("request body must be a JSON object"));
        };
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| Error::invalid_argument(format!("malformed request body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(value: Value) -> SearchRequest {
        serde_json::from_value(value).expect("request should decode")
    }

    #[test]
    fn test_absent_and_null_fields_are_none() {
        let request = decode(json!({"query": null}));
        assert!(request.query.is_none());
        assert!(request.top_k.is_none());
        assert!(request.module_orgs.is_none());
    }

    #[test]
    fn test_scalar_shapes() {
        let request = decode(json!({"query": "x", "top_k": 10, "type": 3}));
        assert_eq!(request.query, Some(Param::Valid("x".to_string())));
        assert_eq!(request.top_k, Some(Param::Valid(10.0)));
        assert_eq!(request.result_type, Some(Param::Invalid(json!(3))));
    }

    #[test]
    fn test_list_shapes() {
        let request = decode(json!({
            "module_orgs": ["a", "b"],
            "derivatives": "c,d",
            "build_phases": [1, 2]
        }));
        assert_eq!(
            request.module_orgs,
            Some(ListParam::List(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(request.derivatives, Some(ListParam::Csv("c,d".to_string())));
        assert_eq!(request.build_phases, Some(ListParam::Invalid(json!([1, 2]))));
    }

    #[test]
    fn test_from_body_requires_object() {
        for body in [json!(["firmware update", 10]), json!("x"), json!(42), Value::Null] {
            let err = SearchRequest::from_body(body).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
            assert!(err.to_string().contains("must be a JSON object"));
        }
    }

    #[test]
    fn test_from_body_accepts_object() {
        let request = SearchRequest::from_body(json!({"query": "x", "top_k": 3})).unwrap();
        assert_eq!(request.query, Some(Param::Valid("x".to_string())));
        assert_eq!(request.top_k, Some(Param::Valid(3.0)));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let request = decode(json!({"query": "x", "minimum_search_score": 0.4}));
        assert_eq!(request.query, Some(Param::Valid("x".to_string())));
    }
}
