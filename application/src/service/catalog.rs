use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, GetBookDto};

#[async_trait::async_trait]
pub trait CatalogService: 'static + Sync + Send + DependOnBookQuery + DependOnBookModifier {
    async fn add_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        if self
            .book_query()
            .find_by_id(&mut transaction, &id)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::DuplicateId)
                .attach_printable(format!("Book `{id}` is already catalogued")));
        }

        let book = Book::new(id, BookTitle::new(dto.title), BookAuthor::new(dto.author));
        self.book_modifier()
            .create(&mut transaction, &book)
            .await?;
        transaction.commit().await?;

        tracing::info!(book_id = %book.id(), "book added to catalog");
        Ok(BookDto::from(book))
    }

    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().read_only().await?;

        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::BookNotFound)
                    .attach_printable(format!("Book `{id}` is not catalogued"))
            })?;

        Ok(BookDto::from(book))
    }

    async fn list_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().read_only().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        tracing::debug!(count = books.len(), "listed catalog");
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> CatalogService for T where T: DependOnBookQuery + DependOnBookModifier {}
