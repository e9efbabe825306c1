//! Wire types for the Gutendex API.

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{AuthorCandidate, BookCandidate, UNKNOWN_LANGUAGE};

/// One page of Gutendex results. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Total matches across all pages (only the first page is fetched).
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<BookRecord>,
}

/// A book as returned by Gutendex.
#[derive(Debug, Clone, Deserialize)]
pub struct BookRecord {
    /// Gutendex book id.
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub download_count: Option<i64>,
}

/// An author entry within a Gutendex book record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

impl From<BookRecord> for BookCandidate {
    fn from(record: BookRecord) -> Self {
        // Only the first author and first language survive the mapping;
        // co-authors and extra languages are discarded.
        let author = record.authors.into_iter().next().map(|a| AuthorCandidate {
            name: a.name,
            birth_year: a.birth_year,
            death_year: a.death_year,
        });

        let language = record
            .languages
            .into_iter()
            .next()
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());

        BookCandidate {
            title: record.title,
            language,
            download_count: record.download_count,
            gutendex_id: Some(record.id),
            author,
        }
    }
}

/// Errors for Gutendex operations.
#[derive(Debug, Error)]
pub enum GutendexError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_response_ignores_unknown_fields() {
        let json = r#"{
            "count": 2,
            "next": "https://gutendex.com/books/?page=2&search=tolstoy",
            "previous": null,
            "results": [{
                "id": 2600,
                "title": "War and Peace",
                "authors": [{"name": "Tolstoy, Leo", "birth_year": 1828, "death_year": 1910}],
                "translators": [],
                "subjects": ["Historical fiction"],
                "languages": ["en"],
                "copyright": false,
                "media_type": "Text",
                "formats": {"text/html": "https://www.gutenberg.org/ebooks/2600.html"},
                "download_count": 12345
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.count, 2);
        assert!(response.next.is_some());
        assert_eq!(response.results.len(), 1);

        let record = &response.results[0];
        assert_eq!(record.id, 2600);
        assert_eq!(record.authors[0].birth_year, Some(1828));
        assert_eq!(record.download_count, Some(12345));
    }

    #[test]
    fn test_candidate_keeps_only_first_author() {
        let record = BookRecord {
            id: 1,
            title: "Collected Essays".to_string(),
            authors: vec![
                AuthorRecord {
                    name: "First Author".to_string(),
                    birth_year: Some(1900),
                    death_year: None,
                },
                AuthorRecord {
                    name: "Second Author".to_string(),
                    birth_year: None,
                    death_year: None,
                },
            ],
            languages: vec!["en".to_string(), "fr".to_string()],
            download_count: Some(7),
        };

        let candidate: BookCandidate = record.into();
        assert_eq!(candidate.author.unwrap().name, "First Author");
        assert_eq!(candidate.language, "en");
        assert_eq!(candidate.gutendex_id, Some(1));
    }

    #[test]
    fn test_candidate_without_authors_or_languages() {
        let record = BookRecord {
            id: 2,
            title: "Anonymous Verse".to_string(),
            authors: vec![],
            languages: vec![],
            download_count: None,
        };

        let candidate: BookCandidate = record.into();
        assert!(candidate.author.is_none());
        assert_eq!(candidate.language, UNKNOWN_LANGUAGE);
        assert!(candidate.download_count.is_none());
    }

    #[test]
    fn test_decode_malformed_body_fails() {
        let result = serde_json::from_str::<SearchResponse>("<html>not json</html>");
        assert!(result.is_err());
    }
}
