//! Book catalog - the local persistent store of imported books and authors.
//!
//! The catalog is append-only from the application's point of view: rows are
//! created by the import pipeline and never updated or deleted.

mod sqlite;
mod types;

pub use sqlite::SqliteStore;
pub use types::*;

/// Trait for catalog storage.
pub trait CatalogStore: Send + Sync {
    /// Find a book whose title case-insensitively contains `text`, or whose
    /// title is contained by `text`.
    ///
    /// Used for duplicate detection before an import. Substring (not exact)
    /// matching mirrors the lookup query of the source system and can flag
    /// prefix titles as duplicates of one another.
    fn find_book_by_title(&self, text: &str) -> Result<Option<Book>, CatalogError>;

    /// Find an author by case-insensitive substring match in either
    /// direction, same rule as [`find_book_by_title`](Self::find_book_by_title).
    fn find_author_by_name(&self, text: &str) -> Result<Option<Author>, CatalogError>;

    /// Authors alive in `year`: `birth_year <= year` and no death year or
    /// `death_year >= year`. Authors without a birth year are never returned.
    fn authors_alive_in_year(&self, year: i32) -> Result<Vec<Author>, CatalogError>;

    /// All books in the given language (exact code match), ordered by title.
    fn books_by_language(&self, language: &str) -> Result<Vec<Book>, CatalogError>;

    /// All books attributed to the given author, ordered by title.
    fn books_by_author(&self, author_id: i64) -> Result<Vec<Book>, CatalogError>;

    /// Every book in the catalog, ordered by title.
    fn all_books(&self) -> Result<Vec<Book>, CatalogError>;

    /// Every author in the catalog, ordered by name.
    fn all_authors(&self) -> Result<Vec<Author>, CatalogError>;

    /// Persist a book and, when `author` is [`AuthorRef::New`], its author,
    /// as a single transaction.
    fn save_book(&self, book: &BookCandidate, author: AuthorRef<'_>)
        -> Result<Book, CatalogError>;

    /// Aggregate download-count statistics, skipping books without a count.
    fn download_stats(&self) -> Result<DownloadStats, CatalogError>;
}
