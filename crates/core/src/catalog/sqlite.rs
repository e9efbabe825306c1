//! SQLite-backed catalog implementation.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use super::{
    Author, AuthorRef, Book, BookCandidate, CatalogError, CatalogStore, DownloadStats,
};

const BOOK_COLUMNS: &str = "b.id, b.title, b.language, b.download_count, b.gutendex_id, \
     a.id, a.name, a.birth_year, a.death_year";

/// SQLite-backed catalog store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a store at `path`, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), CatalogError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS authors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                birth_year INTEGER,
                death_year INTEGER
            );

            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE,
                author_id INTEGER REFERENCES authors(id),
                language TEXT NOT NULL,
                download_count INTEGER,
                gutendex_id INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_books_language ON books(language);
            CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id);
            "#,
        )?;

        Ok(())
    }

    /// Convert a joined row to a Book. Expects the column order of
    /// [`BOOK_COLUMNS`].
    fn row_to_book(row: &rusqlite::Row) -> rusqlite::Result<Book> {
        let author_id: Option<i64> = row.get(5)?;
        let author = match author_id {
            Some(id) => Some(Author {
                id,
                name: row.get(6)?,
                birth_year: row.get(7)?,
                death_year: row.get(8)?,
            }),
            None => None,
        };

        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author,
            language: row.get(2)?,
            download_count: row.get(3)?,
            gutendex_id: row.get(4)?,
        })
    }

    fn row_to_author(row: &rusqlite::Row) -> rusqlite::Result<Author> {
        Ok(Author {
            id: row.get(0)?,
            name: row.get(1)?,
            birth_year: row.get(2)?,
            death_year: row.get(3)?,
        })
    }

    fn load_author(conn: &Connection, id: i64) -> Result<Author, CatalogError> {
        let author = conn.query_row(
            "SELECT id, name, birth_year, death_year FROM authors WHERE id = ?1",
            params![id],
            Self::row_to_author,
        )?;
        Ok(author)
    }

    fn query_books(conn: &Connection, sql: &str, text: Option<&str>) -> Result<Vec<Book>, CatalogError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = match text {
            Some(text) => stmt.query_map(params![text], Self::row_to_book)?,
            None => stmt.query_map([], Self::row_to_book)?,
        };

        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }
}

impl CatalogStore for SqliteStore {
    fn find_book_by_title(&self, text: &str) -> Result<Option<Book>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books b \
             LEFT JOIN authors a ON a.id = b.author_id \
             WHERE instr(lower(b.title), lower(?1)) > 0 \
                OR instr(lower(?1), lower(b.title)) > 0 \
             LIMIT 1"
        );

        let book = conn
            .query_row(&sql, params![text], Self::row_to_book)
            .optional()?;
        Ok(book)
    }

    fn find_author_by_name(&self, text: &str) -> Result<Option<Author>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let author = conn
            .query_row(
                "SELECT id, name, birth_year, death_year FROM authors \
                 WHERE instr(lower(name), lower(?1)) > 0 \
                    OR instr(lower(?1), lower(name)) > 0 \
                 LIMIT 1",
                params![text],
                Self::row_to_author,
            )
            .optional()?;
        Ok(author)
    }

    fn authors_alive_in_year(&self, year: i32) -> Result<Vec<Author>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, birth_year, death_year FROM authors \
             WHERE birth_year IS NOT NULL AND birth_year <= ?1 \
               AND (death_year IS NULL OR death_year >= ?1) \
             ORDER BY name",
        )?;

        let rows = stmt.query_map(params![year], Self::row_to_author)?;
        let mut authors = Vec::new();
        for row in rows {
            authors.push(row?);
        }
        Ok(authors)
    }

    fn books_by_language(&self, language: &str) -> Result<Vec<Book>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books b \
             LEFT JOIN authors a ON a.id = b.author_id \
             WHERE b.language = ?1 \
             ORDER BY b.title"
        );
        Self::query_books(&conn, &sql, Some(language))
    }

    fn books_by_author(&self, author_id: i64) -> Result<Vec<Book>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books b \
             LEFT JOIN authors a ON a.id = b.author_id \
             WHERE b.author_id = ?1 \
             ORDER BY b.title"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![author_id], Self::row_to_book)?;

        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }

    fn all_books(&self) -> Result<Vec<Book>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books b \
             LEFT JOIN authors a ON a.id = b.author_id \
             ORDER BY b.title"
        );
        Self::query_books(&conn, &sql, None)
    }

    fn all_authors(&self) -> Result<Vec<Author>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, birth_year, death_year FROM authors ORDER BY name",
        )?;

        let rows = stmt.query_map([], Self::row_to_author)?;
        let mut authors = Vec::new();
        for row in rows {
            authors.push(row?);
        }
        Ok(authors)
    }

    fn save_book(
        &self,
        book: &BookCandidate,
        author: AuthorRef<'_>,
    ) -> Result<Book, CatalogError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let author_id = match &author {
            AuthorRef::None => None,
            AuthorRef::Existing(id) => Some(*id),
            AuthorRef::New(candidate) => {
                tx.execute(
                    "INSERT INTO authors (name, birth_year, death_year) VALUES (?1, ?2, ?3)",
                    params![candidate.name, candidate.birth_year, candidate.death_year],
                )?;
                Some(tx.last_insert_rowid())
            }
        };

        tx.execute(
            "INSERT INTO books (title, author_id, language, download_count, gutendex_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                book.title,
                author_id,
                book.language,
                book.download_count,
                book.gutendex_id
            ],
        )?;
        let book_id = tx.last_insert_rowid();

        // Read the author back so a rebound book reports the stored years,
        // not the candidate's.
        let stored_author = match author_id {
            Some(id) => Some(Self::load_author(&tx, id)?),
            None => None,
        };

        tx.commit()?;

        Ok(Book {
            id: book_id,
            title: book.title.clone(),
            author: stored_author,
            language: book.language.clone(),
            download_count: book.download_count,
            gutendex_id: book.gutendex_id,
        })
    }

    fn download_stats(&self) -> Result<DownloadStats, CatalogError> {
        let conn = self.conn.lock().unwrap();

        // COUNT/MIN/MAX/AVG over a column all skip NULLs.
        let stats = conn.query_row(
            "SELECT COUNT(download_count), MIN(download_count), \
                    MAX(download_count), AVG(download_count) \
             FROM books",
            [],
            |row| {
                Ok(DownloadStats {
                    books_counted: row.get::<_, i64>(0)? as u64,
                    min: row.get(1)?,
                    max: row.get(2)?,
                    average: row.get(3)?,
                })
            },
        )?;

        Ok(stats)
    }
}
