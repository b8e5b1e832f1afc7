//! Mock search backend for testing

use async_trait::async_trait;
use neutrino_core::error::{Error, Result};
use neutrino_core::{SearchBackend, SearchResult};
use std::sync::Mutex;

/// Mock backend that returns canned results and records every query text
pub struct MockSearchBackend {
    results: Vec<SearchResult>,
    page_size: usize,
    failure: Option<String>,
    queries: Mutex<Vec<String>>,
}

impl MockSearchBackend {
    /// Create a mock returning `results`, capped at `page_size`
    pub fn new(results: Vec<SearchResult>, page_size: usize) -> Self {
        Self {
            results,
            page_size,
            failure: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose every search fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            page_size: 0,
            failure: Some(message.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Query texts received so far, oldest first
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(text.to_string());
        }

        if let Some(message) = &self.failure {
            return Err(Error::backend_unavailable(message.clone()));
        }

        Ok(self.results.iter().take(self.page_size).cloned().collect())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
