use crate::config::AppConfig;
use crate::error::StackTrace;
use application::service::{CatalogService, LendingService, RegistryService, SearchService};
use application::transfer::{
    BookDto, CreateBookDto, CreatePatronDto, LendingDto, PatronDto, SearchBookDto,
};
use driver::database::InMemoryDatabase;
use error_stack::ResultExt;
use kernel::prelude::entity::SearchField;
use kernel::KernelError;
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod config;
mod error;

const BOOKS: [(&str, &str, &str); 4] = [
    ("978-0307474728", "Cien Años de Soledad", "Gabriel García Márquez"),
    ("978-8424102928", "Don Quijote de la Mancha", "Miguel de Cervantes"),
    ("978-0451524935", "1984", "George Orwell"),
    ("978-0141439518", "Orgullo y Prejuicio", "Jane Austen"),
];

const PATRONS: [(&str, &str); 2] = [("U001", "Ana García"), ("U002", "Pedro Martínez")];

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let config = AppConfig::load();

    let appender = tracing_appender::rolling::daily(&config.log_directory, "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,demo=debug".into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    tracing::info!(library = %config.library_name, "starting library walkthrough");
    let db = InMemoryDatabase::new();

    for (id, title, author) in BOOKS {
        db.add_book(CreateBookDto {
            id: id.into(),
            title: title.into(),
            author: author.into(),
        })
        .await?;
    }
    for (id, name) in PATRONS {
        db.add_patron(CreatePatronDto {
            id: id.into(),
            name: name.into(),
        })
        .await?;
    }

    show_catalog(&db, &config.library_name).await?;
    show_members(&db, &config.library_name).await?;

    println!("\n--- Borrowing and returning ---");
    let [(cien_anos, ..), (quijote, ..), (orwell, ..), (austen, ..)] = BOOKS;
    let [(ana, _), (pedro, _)] = PATRONS;
    for (patron_id, book_id) in [
        (ana, cien_anos),
        (ana, orwell),
        (pedro, quijote),
        (pedro, cien_anos),
    ] {
        let outcome = db.borrow_book(lending(patron_id, book_id)).await;
        announce("borrowed", patron_id, book_id, outcome)?;
    }
    show_catalog(&db, &config.library_name).await?;
    show_members(&db, &config.library_name).await?;

    for (patron_id, book_id) in [(ana, cien_anos), (pedro, quijote), (ana, austen)] {
        let outcome = db.return_book(lending(patron_id, book_id)).await;
        announce("returned", patron_id, book_id, outcome)?;
    }
    show_catalog(&db, &config.library_name).await?;
    show_members(&db, &config.library_name).await?;

    println!("\n--- Catalog search ---");
    for (query, field) in [
        ("1984", SearchField::Title),
        ("Cervantes", SearchField::Author),
        ("No Existe", SearchField::Title),
    ] {
        let found = db
            .search_books(SearchBookDto {
                query: query.into(),
                field,
            })
            .await?;
        println!("\nResults for {field:?} '{query}':");
        if found.is_empty() {
            println!("No books found.");
        }
        found.iter().for_each(|book| println!("{book}"));
    }

    let snapshot = Snapshot {
        books: db.list_books().await?,
        patrons: db.list_patrons().await?,
    };
    println!("\n{}", snapshot.to_json()?);

    Ok(())
}

fn lending(patron_id: &str, book_id: &str) -> LendingDto {
    LendingDto {
        patron_id: patron_id.into(),
        book_id: book_id.into(),
    }
}

/// Prints the outcome of a lending request. Rejections are expected and only
/// reported; anything else aborts the walkthrough.
fn announce(
    verb: &str,
    patron_id: &str,
    book_id: &str,
    outcome: error_stack::Result<(), KernelError>,
) -> error_stack::Result<(), KernelError> {
    match outcome {
        Ok(()) => println!("{patron_id} {verb} '{book_id}'."),
        Err(report) => match report.current_context() {
            KernelError::BookUnavailable | KernelError::NotBorrowedByPatron => {
                println!("{patron_id} could not have {verb} '{book_id}': {report}")
            }
            _ => return Err(report),
        },
    }
    Ok(())
}

async fn show_catalog(
    db: &InMemoryDatabase,
    library: &str,
) -> error_stack::Result<(), KernelError> {
    let books = db.list_books().await?;
    println!("{}", render_catalog(library, &books));
    Ok(())
}

async fn show_members(
    db: &InMemoryDatabase,
    library: &str,
) -> error_stack::Result<(), KernelError> {
    let patrons = db.list_patrons().await?;
    println!("{}", render_members(library, &patrons));
    Ok(())
}

fn render_catalog(library: &str, books: &[BookDto]) -> String {
    if books.is_empty() {
        return format!("The catalog of {library} is empty.");
    }
    render_section(&format!("{library} catalog"), books)
}

fn render_members(library: &str, patrons: &[PatronDto]) -> String {
    if patrons.is_empty() {
        return format!("{library} has no registered patrons.");
    }
    render_section(&format!("{library} members"), patrons)
}

fn render_section<T: std::fmt::Display>(heading: &str, rows: &[T]) -> String {
    let mut lines = vec![format!("\n--- {heading} ---")];
    lines.extend(rows.iter().map(ToString::to_string));
    lines.join("\n")
}

#[derive(Serialize)]
struct Snapshot {
    books: Vec<BookDto>,
    patrons: Vec<PatronDto>,
}

impl Snapshot {
    fn to_json(&self) -> error_stack::Result<String, KernelError> {
        serde_json::to_string_pretty(self)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to render library snapshot")
    }
}
