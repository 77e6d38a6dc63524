use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::KernelError;

use crate::transfer::{BookDto, SearchBookDto};

#[async_trait::async_trait]
pub trait SearchService: 'static + Sync + Send + DependOnBookQuery {
    /// Books whose selected field contains `query`, ignoring case, in catalog order.
    async fn search_books(
        &self,
        dto: SearchBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().read_only().await?;
        let books = self.book_query().find_all(&mut connection).await?;

        let SearchBookDto { query, field } = dto;
        let found = books
            .into_iter()
            .filter(|book| field.matches(book, &query))
            .map(BookDto::from)
            .collect::<Vec<_>>();
        tracing::debug!(?field, %query, hits = found.len(), "searched catalog");
        Ok(found)
    }
}

impl<T> SearchService for T where T: DependOnBookQuery {}
