use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Patron;
use crate::KernelError;

#[async_trait::async_trait]
pub trait PatronModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        patron: &Patron,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        patron: &Patron,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnPatronModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type PatronModifier: PatronModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn patron_modifier(&self) -> &Self::PatronModifier;
}
