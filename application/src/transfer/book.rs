use std::fmt::Display;

use serde::Serialize;

use kernel::prelude::entity::{Book, DestructBook, SearchField};

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            available: status.is_available(),
        }
    }
}

impl Display for BookDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.available {
            "Available"
        } else {
            "Borrowed"
        };
        write!(
            f,
            "Title: {}, Author: {}, ISBN: {}, Status: {}",
            self.title, self.author, self.id, status
        )
    }
}

pub struct GetBookDto {
    pub id: String,
}

pub struct CreateBookDto {
    pub id: String,
    pub title: String,
    pub author: String,
}

pub struct SearchBookDto {
    pub query: String,
    pub field: SearchField,
}

#[cfg(test)]
mod test {
    use crate::transfer::BookDto;

    fn book(available: bool) -> BookDto {
        BookDto {
            id: "978-0451524935".to_string(),
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            available,
        }
    }

    #[test]
    fn available_book_line() {
        assert_eq!(
            book(true).to_string(),
            "Title: 1984, Author: George Orwell, ISBN: 978-0451524935, Status: Available"
        );
    }

    #[test]
    fn borrowed_book_line() {
        assert_eq!(
            book(false).to_string(),
            "Title: 1984, Author: George Orwell, ISBN: 978-0451524935, Status: Borrowed"
        );
    }
}
