use std::fmt::Display;

use serde::Serialize;

use kernel::prelude::entity::{DestructPatron, Patron};

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct PatronDto {
    pub id: String,
    pub name: String,
    pub held_books: Vec<String>,
}

impl From<Patron> for PatronDto {
    fn from(value: Patron) -> Self {
        let DestructPatron {
            id,
            name,
            held_books,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            held_books: held_books.into_iter().map(String::from).collect(),
        }
    }
}

impl Display for PatronDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patron: {}, ID: {}, Borrowed books: {}",
            self.name,
            self.id,
            self.held_books.len()
        )
    }
}

pub struct GetPatronDto {
    pub id: String,
}

pub struct CreatePatronDto {
    pub id: String,
    pub name: String,
}
