//! Gutendex book source - the external catalog books are imported from.
//!
//! Gutendex (<https://gutendex.com>) serves the Project Gutenberg catalog as
//! JSON. Only the first result page is ever consumed; the unfiltered list
//! endpoint is ordered by download count, which the popular import relies on.

mod client;
mod types;

pub use client::{GutendexClient, GutendexConfig};
pub use types::*;

use async_trait::async_trait;

/// Trait for a searchable external book catalog.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Search books by title. Fetches a single page, no pagination.
    async fn search(&self, query: &str) -> Result<SearchResponse, GutendexError>;

    /// Fetch the unfiltered first page, ordered by the source's own
    /// popularity ranking.
    async fn popular(&self) -> Result<SearchResponse, GutendexError>;
}
