//! Interactive numbered menu.
//!
//! Every error path prints a message and returns control to the loop; the
//! only ways out are option 0 and end of input.

use std::io::{self, Write};
use std::sync::Arc;

use tracing::error;

use bookshelf_core::{
    Author, Book, CatalogError, CatalogStore, DownloadStats, ImportOutcome, Importer,
};

const MENU: &str = "\
*** Bookshelf ***

Choose an option:
1 - search and import a book by title
2 - list all cataloged books
3 - list all cataloged authors
4 - list authors alive in a given year
5 - list books in a given language
6 - import the top 10 most-downloaded books
7 - show download statistics

0 - quit";

pub struct Menu {
    importer: Importer,
    store: Arc<dyn CatalogStore>,
}

impl Menu {
    pub fn new(importer: Importer, store: Arc<dyn CatalogStore>) -> Self {
        Self { importer, store }
    }

    /// Run the menu loop until the user quits or stdin closes.
    pub async fn run(&self) -> io::Result<()> {
        loop {
            println!("{MENU}");
            let Some(line) = prompt("> ")? else {
                break;
            };

            match parse_choice(&line) {
                Some(0) => {
                    println!("Goodbye.");
                    break;
                }
                Some(1) => self.search_by_title().await?,
                Some(2) => self.list_books(),
                Some(3) => self.list_authors(),
                Some(4) => self.list_authors_alive()?,
                Some(5) => self.list_books_by_language()?,
                Some(6) => self.import_popular().await,
                Some(7) => self.show_stats(),
                _ => println!("Invalid option, choose 0-7."),
            }
            println!();
        }

        Ok(())
    }

    async fn search_by_title(&self) -> io::Result<()> {
        let Some(title) = prompt("Title to search: ")? else {
            return Ok(());
        };
        let title = title.trim();
        if title.is_empty() {
            println!("Nothing to search for.");
            return Ok(());
        }

        match self.importer.search_and_import(title).await {
            Ok(ImportOutcome::AlreadyCataloged(book)) => {
                println!("This book is already cataloged.");
                print!("{}", format_book(&book));
            }
            Ok(ImportOutcome::Saved(book)) => {
                println!("Book saved.");
                print!("{}", format_book(&book));
            }
            Ok(ImportOutcome::NoMatch) => {
                println!("No book found with that title in the API.");
            }
            Err(e) => {
                error!("Search failed: {}", e);
                println!("An error occurred during the search. Please try again.");
            }
        }

        Ok(())
    }

    fn list_books(&self) {
        let books = match self.store.all_books() {
            Ok(books) => books,
            Err(e) => return report_catalog_error(e),
        };

        if books.is_empty() {
            println!("No books cataloged yet.");
            return;
        }

        println!("----- CATALOGED BOOKS -----");
        for book in &books {
            print!("{}", format_book(book));
        }
    }

    fn list_authors(&self) {
        let authors = match self.store.all_authors() {
            Ok(authors) => authors,
            Err(e) => return report_catalog_error(e),
        };

        if authors.is_empty() {
            println!("No authors cataloged yet.");
            return;
        }

        println!("----- CATALOGED AUTHORS -----");
        for author in &authors {
            let titles = match self.store.books_by_author(author.id) {
                Ok(books) => books.into_iter().map(|b| b.title).collect::<Vec<_>>(),
                Err(e) => return report_catalog_error(e),
            };
            print!("{}", format_author(author, &titles));
        }
    }

    fn list_authors_alive(&self) -> io::Result<()> {
        let Some(input) = prompt("Year: ")? else {
            return Ok(());
        };
        let Some(year) = parse_year(&input) else {
            println!("That is not a valid year.");
            return Ok(());
        };

        let authors = match self.store.authors_alive_in_year(year) {
            Ok(authors) => authors,
            Err(e) => {
                report_catalog_error(e);
                return Ok(());
            }
        };

        if authors.is_empty() {
            println!("No cataloged author was alive in {year}.");
            return Ok(());
        }

        println!("----- AUTHORS ALIVE IN {year} -----");
        for author in &authors {
            let titles = match self.store.books_by_author(author.id) {
                Ok(books) => books.into_iter().map(|b| b.title).collect::<Vec<_>>(),
                Err(e) => {
                    report_catalog_error(e);
                    return Ok(());
                }
            };
            print!("{}", format_author(author, &titles));
        }

        Ok(())
    }

    fn list_books_by_language(&self) -> io::Result<()> {
        let Some(input) = prompt("Language code (e.g. en, pt, fr): ")? else {
            return Ok(());
        };
        let code = input.trim();
        if code.is_empty() {
            println!("No language given.");
            return Ok(());
        }

        let books = match self.store.books_by_language(code) {
            Ok(books) => books,
            Err(e) => {
                report_catalog_error(e);
                return Ok(());
            }
        };

        if books.is_empty() {
            println!("No cataloged books in language '{code}'.");
            return Ok(());
        }

        println!("----- BOOKS IN '{code}' -----");
        for book in &books {
            print!("{}", format_book(book));
        }

        Ok(())
    }

    async fn import_popular(&self) {
        println!("Importing the top 10 most-downloaded books...");

        match self.importer.import_popular().await {
            Ok(summary) => println!(
                "Processed {} records: {} saved, {} already cataloged.",
                summary.processed, summary.saved, summary.skipped
            ),
            Err(e) => {
                error!("Popular import failed: {}", e);
                println!("An error occurred during the import. Please try again.");
            }
        }
    }

    fn show_stats(&self) {
        match self.store.download_stats() {
            Ok(stats) => print!("{}", format_stats(&stats)),
            Err(e) => report_catalog_error(e),
        }
    }
}

fn report_catalog_error(e: CatalogError) {
    error!("Catalog query failed: {}", e);
    println!("Could not read the catalog. Please try again.");
}

/// Print `text`, flush, and read one line. `None` means stdin closed.
fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn parse_choice(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

fn parse_year(input: &str) -> Option<i32> {
    input.trim().parse().ok()
}

fn format_book(book: &Book) -> String {
    let author = book
        .author
        .as_ref()
        .map(|a| a.name.as_str())
        .unwrap_or("unknown author");
    let downloads = book
        .download_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "----- BOOK -----\n\
         Title: {}\n\
         Author: {}\n\
         Language: {}\n\
         Downloads: {}\n\
         ----------------\n",
        book.title, author, book.language, downloads
    )
}

fn format_author(author: &Author, titles: &[String]) -> String {
    let year = |y: Option<i32>| y.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());

    format!(
        "----- AUTHOR -----\n\
         Name: {}\n\
         Born: {}\n\
         Died: {}\n\
         Books: [{}]\n\
         ------------------\n",
        author.name,
        year(author.birth_year),
        year(author.death_year),
        titles.join(", ")
    )
}

fn format_stats(stats: &DownloadStats) -> String {
    match (stats.min, stats.max, stats.average) {
        (Some(min), Some(max), Some(average)) => format!(
            "Books with a download count: {}\n\
             Min downloads: {}\n\
             Max downloads: {}\n\
             Average downloads: {average:.2}\n",
            stats.books_counted, min, max
        ),
        _ => "No download counts recorded yet.\n".to_string(),
    }
}
