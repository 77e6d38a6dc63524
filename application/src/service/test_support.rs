use kernel::KernelError;

use crate::service::{CatalogService, RegistryService};
use crate::transfer::{CreateBookDto, CreatePatronDto, LendingDto};

pub fn create_book(id: &str, title: &str, author: &str) -> CreateBookDto {
    CreateBookDto {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
    }
}

pub fn create_patron(id: &str, name: &str) -> CreatePatronDto {
    CreatePatronDto {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn lending(patron_id: &str, book_id: &str) -> LendingDto {
    LendingDto {
        patron_id: patron_id.to_string(),
        book_id: book_id.to_string(),
    }
}

/// Panics unless every borrowed book has exactly one holder and every
/// available book has none.
pub async fn assert_lending_invariant<T>(service: &T) -> error_stack::Result<(), KernelError>
where
    T: CatalogService + RegistryService,
{
    let books = service.list_books().await?;
    let patrons = service.list_patrons().await?;
    for patron in &patrons {
        for held in &patron.held_books {
            assert!(
                books.iter().any(|book| &book.id == held),
                "{} holds uncatalogued book {held}",
                patron.id
            );
        }
    }
    for book in &books {
        let holders = patrons
            .iter()
            .filter(|patron| patron.held_books.contains(&book.id))
            .count();
        let expected = if book.available { 0 } else { 1 };
        assert_eq!(holders, expected, "book {} has {holders} holders", book.id);
    }
    Ok(())
}
