use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.books().get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.books().all())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if con.books().contains(book.id()) {
            return Err(Report::new(KernelError::DuplicateId)
                .attach_printable(format!("Book `{}` already exists", book.id())));
        }
        con.staged_mut()?
            .books
            .upsert(book.id().clone(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if !con.books().contains(book.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Book `{}` has no stored row", book.id())));
        }
        con.staged_mut()?
            .books
            .upsert(book.id().clone(), book.clone());
        Ok(())
    }
}
