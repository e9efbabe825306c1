//! Import/dedupe pipeline - turns decoded Gutendex records into catalog rows.
//!
//! The pipeline preserves two uniqueness rules: a title already in the
//! catalog is never re-imported, and two records naming the same author end
//! up referencing a single author row. Writes happen only after a successful
//! fetch and decode, so a failed operation leaves no partial state.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{AuthorRef, Book, BookCandidate, CatalogError, CatalogStore};
use crate::gutendex::{BookSource, GutendexError};

/// How many records a popular import takes from the first page.
const POPULAR_IMPORT_LIMIT: usize = 10;

/// Outcome of importing a single candidate.
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    /// A matching title is already stored; nothing was written.
    AlreadyCataloged(Book),
    /// The book (and, if new, its author) was persisted.
    Saved(Book),
    /// The search returned no results.
    NoMatch,
}

/// Summary of a bulk import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records taken from the result page.
    pub processed: u32,
    /// New books persisted.
    pub saved: u32,
    /// Records skipped as already cataloged.
    pub skipped: u32,
}

/// Errors for import operations.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Search failed: {0}")]
    Source(#[from] GutendexError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// The import pipeline, holding its collaborators as explicit dependencies.
pub struct Importer {
    source: Arc<dyn BookSource>,
    store: Arc<dyn CatalogStore>,
}

impl Importer {
    pub fn new(source: Arc<dyn BookSource>, store: Arc<dyn CatalogStore>) -> Self {
        Self { source, store }
    }

    /// Run the dedupe/merge steps on one decoded candidate.
    ///
    /// Title lookup is substring-based, so re-importing an already stored
    /// title is a no-op. When the candidate's author matches an existing row
    /// the book is rebound to it; the stored birth/death years win over the
    /// candidate's.
    pub fn import_candidate(
        &self,
        candidate: &BookCandidate,
    ) -> Result<ImportOutcome, ImportError> {
        if let Some(existing) = self.store.find_book_by_title(&candidate.title)? {
            debug!("Already cataloged: '{}'", existing.title);
            return Ok(ImportOutcome::AlreadyCataloged(existing));
        }

        let author_ref = match &candidate.author {
            None => AuthorRef::None,
            Some(author) => match self.store.find_author_by_name(&author.name)? {
                Some(existing) => {
                    if existing.birth_year != author.birth_year
                        || existing.death_year != author.death_year
                    {
                        warn!(
                            "Keeping stored years for author '{}' ({:?}-{:?}), \
                             discarding candidate years ({:?}-{:?})",
                            existing.name,
                            existing.birth_year,
                            existing.death_year,
                            author.birth_year,
                            author.death_year
                        );
                    }
                    AuthorRef::Existing(existing.id)
                }
                None => AuthorRef::New(author),
            },
        };

        let book = self.store.save_book(candidate, author_ref)?;
        info!("Cataloged '{}'", book.title);
        Ok(ImportOutcome::Saved(book))
    }

    /// Search the source for `query` and import the first result.
    ///
    /// The local store is checked with the raw query before any network
    /// call, so re-searching a cataloged title never refetches it.
    pub async fn search_and_import(&self, query: &str) -> Result<ImportOutcome, ImportError> {
        if let Some(existing) = self.store.find_book_by_title(query)? {
            debug!("Skipping fetch, already cataloged: '{}'", existing.title);
            return Ok(ImportOutcome::AlreadyCataloged(existing));
        }

        let response = self.source.search(query).await?;
        let Some(record) = response.results.into_iter().next() else {
            return Ok(ImportOutcome::NoMatch);
        };

        self.import_candidate(&record.into())
    }

    /// Import the 10 most-downloaded books from the source's unfiltered
    /// first page, continuing past already-cataloged titles.
    pub async fn import_popular(&self) -> Result<ImportSummary, ImportError> {
        let response = self.source.popular().await?;

        let mut summary = ImportSummary::default();
        for record in response.results.into_iter().take(POPULAR_IMPORT_LIMIT) {
            summary.processed += 1;
            match self.import_candidate(&record.into())? {
                ImportOutcome::Saved(_) => summary.saved += 1,
                ImportOutcome::AlreadyCataloged(_) => summary.skipped += 1,
                ImportOutcome::NoMatch => {}
            }
        }

        info!(
            "Popular import: {} processed, {} saved, {} skipped",
            summary.processed, summary.saved, summary.skipped
        );
        Ok(summary)
    }
}
