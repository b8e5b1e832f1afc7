//! Integration tests for REST API endpoints
//!
//! These tests drive the real router with a mock search backend, so no
//! network access is needed.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use neutrino_core::config::ServerConfig;
use neutrino_core::SearchResult;
use neutrino_search_client::MockSearchBackend;
use neutrino_server::{build_router, AppState, SearchRequestAdapter};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn kb_result(id: &str, orgs: &[&str]) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        summary: format!("Summary {id}"),
        description: format!("Description {id}"),
        result_type: "howto".to_string(),
        url: format!("https://kb.example.com/{id}"),
        module_orgs: orgs.iter().map(|o| o.to_string()).collect(),
    }
}

fn app_with(backend: Arc<MockSearchBackend>) -> Router {
    let adapter = SearchRequestAdapter::new(backend, Some("kbidx".to_string()));
    build_router(AppState::new(adapter), &ServerConfig::default())
}

fn search_request(body: &str) -> Result<Request<Body>, axum::http::Error> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
}

async fn body_json(response: axum::response::Response) -> Result<Value, Box<dyn std::error::Error>> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

async fn body_text(response: axum::response::Response) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[tokio::test]
async fn test_search_returns_backend_results_verbatim() -> TestResult {
    let backend = Arc::new(MockSearchBackend::new(
        vec![kb_result("1", &["org1"]), kb_result("2", &[])],
        5,
    ));
    let app = app_with(backend.clone());

    let response = app
        .oneshot(search_request(r#"{"query": "firmware update"}"#)?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(
        body,
        json!([
            {
                "id": "1",
                "summary": "Summary 1",
                "description": "Description 1",
                "type": "howto",
                "url": "https://kb.example.com/1",
                "module_orgs": ["org1"]
            },
            {
                "id": "2",
                "summary": "Summary 2",
                "description": "Description 2",
                "type": "howto",
                "url": "https://kb.example.com/2",
                "module_orgs": []
            }
        ])
    );
    assert_eq!(backend.queries(), vec!["firmware update"]);
    Ok(())
}

#[tokio::test]
async fn test_search_forwards_only_query_text() -> TestResult {
    let backend = Arc::new(MockSearchBackend::new(vec![kb_result("1", &[])], 5));
    let app = app_with(backend.clone());

    let response = app
        .oneshot(search_request(
            r#"{"query": "x", "module_orgs": "org1,org2", "top_k": 10}"#,
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.queries(), vec!["x"]);
    Ok(())
}

#[tokio::test]
async fn test_search_missing_query_is_bad_request() -> TestResult {
    let backend = Arc::new(MockSearchBackend::new(Vec::new(), 5));
    let app = app_with(backend.clone());

    let response = app.oneshot(search_request(r#"{"top_k": 3}"#)?).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body, json!({"error": "Missing 'query' parameter"}));
    assert!(backend.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_search_numeric_filter_is_bad_request() -> TestResult {
    let app = app_with(Arc::new(MockSearchBackend::new(Vec::new(), 5)));

    let response = app
        .oneshot(search_request(r#"{"query": "x", "module_orgs": 42}"#)?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    let message = body["error"].as_str().unwrap_or_default();
    assert!(message.contains("expected a string or list of strings"));
    Ok(())
}

#[tokio::test]
async fn test_search_unknown_retrieval_mode_is_bad_request() -> TestResult {
    let app = app_with(Arc::new(MockSearchBackend::new(Vec::new(), 5)));

    let response = app
        .oneshot(search_request(
            r#"{"query": "x", "retrieval_mode": "semantic"}"#,
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_search_malformed_json_is_bad_request() -> TestResult {
    let app = app_with(Arc::new(MockSearchBackend::new(Vec::new(), 5)));

    let response = app.oneshot(search_request(r#"{"query": "#)?).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_search_array_body_is_bad_request() -> TestResult {
    let backend = Arc::new(MockSearchBackend::new(vec![kb_result("1", &[])], 5));
    let app = app_with(backend.clone());

    let response = app
        .oneshot(search_request(
            r#"["firmware update", 10, null, "org1,org2"]"#,
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(
        body,
        json!({"error": "Invalid argument: request body must be a JSON object"})
    );
    assert!(backend.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_search_backend_failure_is_service_unavailable() -> TestResult {
    let app = app_with(Arc::new(MockSearchBackend::failing("index offline")));

    let response = app.oneshot(search_request(r#"{"query": "x"}"#)?).await?;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await?;
    assert_eq!(body, json!({"error": "Search backend unavailable"}));
    Ok(())
}

#[tokio::test]
async fn test_hello_endpoint() -> TestResult {
    let app = app_with(Arc::new(MockSearchBackend::new(Vec::new(), 5)));

    let response = app
        .oneshot(Request::builder().uri("/hello").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "Hello from neutrino\n");
    Ok(())
}

#[tokio::test]
async fn test_hello_user_endpoints() -> TestResult {
    let app = app_with(Arc::new(MockSearchBackend::new(Vec::new(), 5)));

    for uri in ["/hello/user", "/hello"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from("John"))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await?, "Hello from neutrino, John\n");
    }
    Ok(())
}

#[tokio::test]
async fn test_health_endpoint() -> TestResult {
    let app = app_with(Arc::new(MockSearchBackend::new(Vec::new(), 5)));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["dependencies"]["search_backend"]["provider"], "mock");
    Ok(())
}

#[tokio::test]
async fn test_openapi_document_lists_search_path() -> TestResult {
    let app = app_with(Arc::new(MockSearchBackend::new(Vec::new(), 5)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert!(body["paths"]["/search"]["post"].is_object());
    assert!(body["paths"]["/hello"]["get"].is_object());
    assert!(body["paths"]["/hello"]["post"].is_object());
    assert!(body["paths"]["/hello/user"]["post"].is_object());
    assert!(body["components"]["schemas"]["SearchResult"].is_object());
    Ok(())
}
