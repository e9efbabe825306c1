//! Types for the book catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Language stored when the source record lists no languages.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// A persisted author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Row id.
    pub id: i64,
    /// Author name (unique within the catalog).
    pub name: String,
    /// Birth year, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    /// Death year, if known (absent for living authors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_year: Option<i32>,
}

/// A persisted book row, with its author joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Row id.
    pub id: i64,
    /// Book title (unique within the catalog).
    pub title: String,
    /// The book's author, if the source record listed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Language code (first language of the source record, or "unknown").
    pub language: String,
    /// Download count reported by the source, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_count: Option<i64>,
    /// Book id in the source catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gutendex_id: Option<i64>,
}

/// A decoded author that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCandidate {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

/// A decoded book that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCandidate {
    pub title: String,
    pub language: String,
    pub download_count: Option<i64>,
    pub gutendex_id: Option<i64>,
    /// First author of the source record; co-authors are discarded.
    pub author: Option<AuthorCandidate>,
}

/// How a book being saved refers to its author.
#[derive(Debug, Clone)]
pub enum AuthorRef<'a> {
    /// The source record listed no author.
    None,
    /// Reuse an already-persisted author row.
    Existing(i64),
    /// Create the author together with the book, in the same transaction.
    New(&'a AuthorCandidate),
}

/// Aggregate download-count statistics over the catalog.
///
/// Books without a recorded download count are excluded from every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadStats {
    /// Number of books with a recorded download count.
    pub books_counted: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for CatalogError {
    fn from(e: rusqlite::Error) -> Self {
        CatalogError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_serialization_skips_absent_fields() {
        let book = Book {
            id: 1,
            title: "Dom Casmurro".to_string(),
            author: None,
            language: UNKNOWN_LANGUAGE.to_string(),
            download_count: None,
            gutendex_id: Some(55752),
        };

        let json = serde_json::to_string(&book).unwrap();
        assert!(!json.contains("author"));
        assert!(!json.contains("download_count"));
        assert!(json.contains("unknown"));
    }

    #[test]
    fn test_stats_serialization_skips_empty_aggregates() {
        let stats = DownloadStats {
            books_counted: 0,
            min: None,
            max: None,
            average: None,
        };

        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("min"));
        assert!(!json.contains("average"));
    }
}
