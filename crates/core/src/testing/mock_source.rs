//! Mock book source for testing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::gutendex::{BookRecord, BookSource, GutendexError, SearchResponse};

/// Mock implementation of the [`BookSource`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable results
/// - Track search queries for assertions
/// - Fail the next call with an injected error
#[derive(Default)]
pub struct MockBookSource {
    /// Configured records to return from both `search` and `popular`.
    results: Arc<RwLock<Vec<BookRecord>>>,
    /// Recorded search queries.
    searches: Arc<RwLock<Vec<String>>>,
    /// Number of `popular` calls made.
    popular_calls: Arc<RwLock<u32>>,
    /// If set, the next call fails with this error.
    next_error: Arc<RwLock<Option<GutendexError>>>,
}

impl MockBookSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the records returned by subsequent calls.
    pub async fn set_results(&self, records: Vec<BookRecord>) {
        *self.results.write().await = records;
    }

    /// Make the next call fail with `error`.
    pub async fn fail_next(&self, error: GutendexError) {
        *self.next_error.write().await = Some(error);
    }

    /// Queries recorded by `search`.
    pub async fn recorded_searches(&self) -> Vec<String> {
        self.searches.read().await.clone()
    }

    /// How many times `popular` was called.
    pub async fn popular_call_count(&self) -> u32 {
        *self.popular_calls.read().await
    }

    async fn respond(&self) -> Result<SearchResponse, GutendexError> {
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let results = self.results.read().await.clone();
        Ok(SearchResponse {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        })
    }
}

#[async_trait]
impl BookSource for MockBookSource {
    async fn search(&self, query: &str) -> Result<SearchResponse, GutendexError> {
        self.searches.write().await.push(query.to_string());
        self.respond().await
    }

    async fn popular(&self) -> Result<SearchResponse, GutendexError> {
        *self.popular_calls.write().await += 1;
        self.respond().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_mock_records_searches() {
        let source = MockBookSource::new();
        source
            .set_results(vec![fixtures::book_record(1, "Hamlet", "Shakespeare")])
            .await;

        let response = source.search("hamlet").await.unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(source.recorded_searches().await, vec!["hamlet"]);
    }

    #[tokio::test]
    async fn test_mock_injected_error_fires_once() {
        let source = MockBookSource::new();
        source
            .fail_next(GutendexError::Decode("bad payload".to_string()))
            .await;

        assert!(source.popular().await.is_err());
        assert!(source.popular().await.is_ok());
        assert_eq!(source.popular_call_count().await, 2);
    }
}
