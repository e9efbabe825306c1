pub mod catalog;
pub mod config;
pub mod gutendex;
pub mod importer;
pub mod testing;

pub use catalog::{
    Author, AuthorCandidate, AuthorRef, Book, BookCandidate, CatalogError, CatalogStore,
    DownloadStats, SqliteStore,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
};
pub use gutendex::{
    AuthorRecord, BookRecord, BookSource, GutendexClient, GutendexConfig, GutendexError,
    SearchResponse,
};
pub use importer::{ImportError, ImportOutcome, ImportSummary, Importer};
