//! Testing utilities and mock implementations.
//!
//! Provides a mock book source behind the same trait the real Gutendex
//! client implements, so pipeline tests run without network access.

mod mock_source;

pub use mock_source::MockBookSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::gutendex::{AuthorRecord, BookRecord};

    /// Create a test book record with one author and reasonable defaults.
    pub fn book_record(id: i64, title: &str, author: &str) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            authors: vec![AuthorRecord {
                name: author.to_string(),
                birth_year: Some(1800),
                death_year: Some(1870),
            }],
            languages: vec!["en".to_string()],
            download_count: Some(1000 - id),
        }
    }

    /// Create a test book record with no authors and no languages.
    pub fn anonymous_record(id: i64, title: &str) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            authors: vec![],
            languages: vec![],
            download_count: None,
        }
    }
}
