use error_stack::Report;

use kernel::interface::query::PatronQuery;
use kernel::interface::update::PatronModifier;
use kernel::prelude::entity::{Patron, PatronId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryPatronRepository;

#[async_trait::async_trait]
impl PatronQuery for InMemoryPatronRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &PatronId,
    ) -> error_stack::Result<Option<Patron>, KernelError> {
        Ok(con.patrons().get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Patron>, KernelError> {
        Ok(con.patrons().all())
    }
}

#[async_trait::async_trait]
impl PatronModifier for InMemoryPatronRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        patron: &Patron,
    ) -> error_stack::Result<(), KernelError> {
        if con.patrons().contains(patron.id()) {
            return Err(Report::new(KernelError::DuplicateId)
                .attach_printable(format!("Patron `{}` already exists", patron.id())));
        }
        con.staged_mut()?
            .patrons
            .upsert(patron.id().clone(), patron.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        patron: &Patron,
    ) -> error_stack::Result<(), KernelError> {
        if !con.patrons().contains(patron.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Patron `{}` has no stored row", patron.id())));
        }
        con.staged_mut()?
            .patrons
            .upsert(patron.id().clone(), patron.clone());
        Ok(())
    }
}
