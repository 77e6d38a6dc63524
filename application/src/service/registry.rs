use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnPatronQuery, PatronQuery};
use kernel::interface::update::{DependOnPatronModifier, PatronModifier};
use kernel::prelude::entity::{Patron, PatronId, PatronName};
use kernel::KernelError;

use crate::transfer::{CreatePatronDto, GetPatronDto, PatronDto};

#[async_trait::async_trait]
pub trait RegistryService:
    'static + Sync + Send + DependOnPatronQuery + DependOnPatronModifier
{
    async fn add_patron(
        &self,
        dto: CreatePatronDto,
    ) -> error_stack::Result<PatronDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let id = PatronId::new(dto.id);
        if self
            .patron_query()
            .find_by_id(&mut transaction, &id)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::DuplicateId)
                .attach_printable(format!("Patron `{id}` is already registered")));
        }

        let patron = Patron::new(id, PatronName::new(dto.name));
        self.patron_modifier()
            .create(&mut transaction, &patron)
            .await?;
        transaction.commit().await?;

        tracing::info!(patron_id = %patron.id(), "patron registered");
        Ok(PatronDto::from(patron))
    }

    async fn get_patron(&self, dto: GetPatronDto) -> error_stack::Result<PatronDto, KernelError> {
        let mut connection = self.database_connection().read_only().await?;

        let id = PatronId::new(dto.id);
        let patron = self
            .patron_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::PatronNotFound)
                    .attach_printable(format!("Patron `{id}` is not registered"))
            })?;

        Ok(PatronDto::from(patron))
    }

    async fn list_patrons(&self) -> error_stack::Result<Vec<PatronDto>, KernelError> {
        let mut connection = self.database_connection().read_only().await?;
        let patrons = self.patron_query().find_all(&mut connection).await?;
        Ok(patrons.into_iter().map(PatronDto::from).collect())
    }
}

impl<T> RegistryService for T where T: DependOnPatronQuery + DependOnPatronModifier {}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::test_support::create_patron;
    use crate::service::RegistryService;
    use crate::transfer::GetPatronDto;

    #[tokio::test]
    async fn registered_patron_holds_nothing() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let added = db.add_patron(create_patron("U001", "Ana")).await?;
        assert!(added.held_books.is_empty());

        let found = db
            .get_patron(GetPatronDto {
                id: "U001".to_string(),
            })
            .await?;
        assert_eq!(found, added);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_patron_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.add_patron(create_patron("U001", "Ana")).await?;

        let report = db
            .add_patron(create_patron("U001", "Pedro"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::DuplicateId);

        let patrons = db.list_patrons().await?;
        assert_eq!(patrons.len(), 1);
        assert_eq!(patrons[0].name, "Ana");
        Ok(())
    }

    #[tokio::test]
    async fn missing_patron_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let report = db
            .get_patron(GetPatronDto {
                id: "U404".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::PatronNotFound);
        Ok(())
    }

    #[tokio::test]
    async fn listing_follows_insertion_order() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.add_patron(create_patron("U002", "Pedro")).await?;
        db.add_patron(create_patron("U001", "Ana")).await?;
        let names = db
            .list_patrons()
            .await?
            .into_iter()
            .map(|patron| patron.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["Pedro", "Ana"]);
        Ok(())
    }
}
