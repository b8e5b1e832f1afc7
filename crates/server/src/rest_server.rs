//! REST API server implementation using Axum
//!
//! Exposes the search endpoint, the greeting endpoints, a health check and
//! the OpenAPI document.

use crate::api::{SearchRequest, SearchRequestAdapter};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use neutrino_core::config::ServerConfig;
use neutrino_core::{Error, RetrievalMode, SearchResult};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

const GREETING: &str = "Hello from neutrino";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<SearchRequestAdapter>,
}

impl AppState {
    pub fn new(adapter: SearchRequestAdapter) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }
}

/// Build the Axum router with all endpoints
pub fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    let router = Router::new()
        // Search
        .route("/search", post(search_handler))
        // Greeting
        .route("/hello", get(hello_handler).post(hello_post_handler))
        .route("/hello/user", post(hello_user_handler))
        // Health check
        .route("/health", get(health_handler))
        // OpenAPI documentation
        .route("/api-docs/openapi.json", get(openapi_handler));

    // Configure CORS based on allowed_origins
    let cors_layer = if server_config.allowed_origins.is_empty() {
        // CORS disabled
        CorsLayer::new()
    } else if server_config.allowed_origins.iter().any(|o| o == "*") {
        // Allow all origins
        CorsLayer::permissive()
    } else {
        // Allow specific origins
        let mut cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE]);

        for origin in &server_config.allowed_origins {
            if let Ok(header_value) = HeaderValue::from_str(origin) {
                cors = cors.allow_origin(header_value);
            }
        }
        cors
    };

    router
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /search
#[utoipa::path(
    post,
    path = "/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Results in backend order", body = [SearchResult]),
        (status = 400, description = "Missing or malformed parameter"),
        (status = 503, description = "Search backend unavailable")
    ),
    tag = "search"
)]
async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("Rejected search body: {rejection}");
        ApiError::InvalidRequest(rejection.body_text())
    })?;
    let request = SearchRequest::from_body(body)?;

    let results = state.adapter.search(request).await?;
    Ok(Json(results))
}

/// GET /hello
#[utoipa::path(
    get,
    path = "/hello",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    ),
    tag = "greeting"
)]
async fn hello_handler() -> String {
    format!("{GREETING}\n")
}

/// POST /hello
#[utoipa::path(
    post,
    path = "/hello",
    request_body(content = String, content_type = "text/plain"),
    responses(
        (status = 200, description = "Personal greeting", body = String, content_type = "text/plain")
    ),
    tag = "greeting"
)]
async fn hello_post_handler(user: String) -> String {
    greet(&user)
}

/// POST /hello/user
#[utoipa::path(
    post,
    path = "/hello/user",
    request_body(content = String, content_type = "text/plain"),
    responses(
        (status = 200, description = "Personal greeting", body = String, content_type = "text/plain")
    ),
    tag = "greeting"
)]
async fn hello_user_handler(user: String) -> String {
    greet(&user)
}

fn greet(user: &str) -> String {
    format!("{GREETING}, {user}\n")
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "health"
)]
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    use serde_json::json;

    let health_status = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "search_backend": {
                "provider": state.adapter.backend_name(),
                "status": "initialized"
            }
        }
    });

    (StatusCode::OK, Json(health_status))
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Error handling for API endpoints
#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    ServiceUnavailable(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(err) => {
                // Log the full error details for debugging
                tracing::error!("Internal server error: {err:?}");
                // Return a generic message to the client to avoid information disclosure
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            e if e.is_client_error() => ApiError::InvalidRequest(e.to_string()),
            Error::BackendUnavailable(cause) => {
                tracing::error!("Search backend failure: {cause}");
                ApiError::ServiceUnavailable("Search backend unavailable".to_string())
            }
            other => ApiError::Internal(other.into()),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        search_handler,
        hello_handler,
        hello_post_handler,
        hello_user_handler,
        health_handler
    ),
    components(schemas(SearchRequest, SearchResult, RetrievalMode)),
    tags(
        (name = "search", description = "Search over the hosted index"),
        (name = "greeting", description = "Greeting demo endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
