//! End-to-end import flow tests: mock source, real SQLite store on disk.

use std::sync::Arc;

use bookshelf_core::testing::{fixtures, MockBookSource};
use bookshelf_core::{
    AuthorRecord, BookRecord, CatalogStore, ImportOutcome, Importer, SqliteStore,
};

fn on_disk_store(dir: &tempfile::TempDir) -> Arc<SqliteStore> {
    Arc::new(SqliteStore::new(&dir.path().join("catalog.db")).unwrap())
}

fn record(id: i64, title: &str, author: &str, language: &str) -> BookRecord {
    BookRecord {
        id,
        title: title.to_string(),
        authors: vec![AuthorRecord {
            name: author.to_string(),
            birth_year: Some(1828),
            death_year: Some(1910),
        }],
        languages: vec![language.to_string()],
        download_count: Some(500),
    }
}

#[tokio::test]
async fn search_import_then_query_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = on_disk_store(&dir);
    let source = Arc::new(MockBookSource::new());
    let importer = Importer::new(source.clone(), store.clone());

    source
        .set_results(vec![record(2600, "War and Peace", "Tolstoy, Leo", "en")])
        .await;
    let outcome = importer.search_and_import("war and peace").await.unwrap();
    assert!(matches!(outcome, ImportOutcome::Saved(_)));

    source
        .set_results(vec![record(1399, "Anna Karenina", "Tolstoy, Leo", "en")])
        .await;
    importer.search_and_import("anna karenina").await.unwrap();

    // Both books share one author row.
    let authors = store.all_authors().unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(store.books_by_author(authors[0].id).unwrap().len(), 2);

    // Tolstoy (1828-1910) shows up for 1890 but not 1911.
    assert_eq!(store.authors_alive_in_year(1890).unwrap().len(), 1);
    assert!(store.authors_alive_in_year(1911).unwrap().is_empty());

    assert_eq!(store.books_by_language("en").unwrap().len(), 2);
    assert!(store.books_by_language("pt").unwrap().is_empty());

    let stats = store.download_stats().unwrap();
    assert_eq!(stats.books_counted, 2);
    assert_eq!(stats.average, Some(500.0));
}

#[tokio::test]
async fn reimport_after_reopen_is_detected_as_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(MockBookSource::new());
    source
        .set_results(vec![record(84, "Frankenstein", "Shelley, Mary", "en")])
        .await;

    {
        let store = on_disk_store(&dir);
        let importer = Importer::new(source.clone(), store);
        importer.search_and_import("frankenstein").await.unwrap();
    }

    // Fresh store handle over the same database file.
    let store = on_disk_store(&dir);
    let importer = Importer::new(source.clone(), store.clone());
    let outcome = importer.search_and_import("frankenstein").await.unwrap();

    assert!(matches!(outcome, ImportOutcome::AlreadyCataloged(_)));
    assert_eq!(store.all_books().unwrap().len(), 1);
    // The duplicate was detected locally, before a second fetch.
    assert_eq!(source.recorded_searches().await.len(), 1);
}

#[tokio::test]
async fn popular_import_fills_an_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let store = on_disk_store(&dir);
    let source = Arc::new(MockBookSource::new());
    let importer = Importer::new(source.clone(), store.clone());

    let page: Vec<_> = (1..=12)
        .map(|i| fixtures::book_record(i, &format!("Classic No. {i:02}"), "Various Hands"))
        .collect();
    source.set_results(page).await;

    let summary = importer.import_popular().await.unwrap();

    assert_eq!(summary.processed, 10);
    assert_eq!(summary.saved, 10);
    assert_eq!(summary.skipped, 0);
    assert_eq!(store.all_books().unwrap().len(), 10);
    assert_eq!(source.popular_call_count().await, 1);
}
