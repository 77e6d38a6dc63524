use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnPatronQuery, PatronQuery};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnPatronModifier, PatronModifier,
};
use kernel::prelude::entity::{BookId, PatronId};
use kernel::KernelError;

use crate::transfer::LendingDto;

/// The only path that changes a book's availability or a patron's held books.
/// Both sides are written in one exclusive transaction, so a rejected request
/// leaves the library untouched.
#[async_trait::async_trait]
pub trait LendingService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnPatronQuery
    + DependOnPatronModifier
{
    async fn borrow_book(&self, dto: LendingDto) -> error_stack::Result<(), KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let patron_id = PatronId::new(dto.patron_id);
        let book_id = BookId::new(dto.book_id);
        let mut patron = self
            .patron_query()
            .find_by_id(&mut transaction, &patron_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::PatronNotFound)
                    .attach_printable(format!("Patron `{patron_id}` is not registered"))
            })?;
        let mut book = self
            .book_query()
            .find_by_id(&mut transaction, &book_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::BookNotFound)
                    .attach_printable(format!("Book `{book_id}` is not catalogued"))
            })?;

        if let Err(report) = patron.borrow_book(&mut book) {
            tracing::warn!(%patron_id, %book_id, "borrow rejected: {}", report.current_context());
            return Err(report);
        }

        self.book_modifier()
            .update(&mut transaction, &book)
            .await?;
        self.patron_modifier()
            .update(&mut transaction, &patron)
            .await?;
        transaction.commit().await?;

        tracing::info!(%patron_id, %book_id, "book borrowed");
        Ok(())
    }

    async fn return_book(&self, dto: LendingDto) -> error_stack::Result<(), KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let patron_id = PatronId::new(dto.patron_id);
        let book_id = BookId::new(dto.book_id);
        let mut patron = self
            .patron_query()
            .find_by_id(&mut transaction, &patron_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::PatronNotFound)
                    .attach_printable(format!("Patron `{patron_id}` is not registered"))
            })?;
        let mut book = self
            .book_query()
            .find_by_id(&mut transaction, &book_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::BookNotFound)
                    .attach_printable(format!("Book `{book_id}` is not catalogued"))
            })?;

        if let Err(report) = patron.return_book(&mut book) {
            tracing::warn!(%patron_id, %book_id, "return rejected: {}", report.current_context());
            return Err(report);
        }

        self.book_modifier()
            .update(&mut transaction, &book)
            .await?;
        self.patron_modifier()
            .update(&mut transaction, &patron)
            .await?;
        transaction.commit().await?;

        tracing::info!(%patron_id, %book_id, "book returned");
        Ok(())
    }
}

impl<T> LendingService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnPatronQuery + DependOnPatronModifier
{
}
