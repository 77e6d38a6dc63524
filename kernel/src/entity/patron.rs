mod held_books;
mod id;
mod name;

pub use self::{held_books::*, id::*, name::*};
use destructure::Destructure;
use error_stack::Report;
use vodca::References;

use crate::entity::{Book, BookStatus};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Patron {
    id: PatronId,
    name: PatronName,
    held_books: HeldBooks,
}

impl Patron {
    pub fn new(id: PatronId, name: PatronName) -> Self {
        Self {
            id,
            name,
            held_books: HeldBooks::default(),
        }
    }

    /// Marks `book` as borrowed and records it as held by this patron.
    /// Nothing changes when the book is already out.
    pub fn borrow_book(&mut self, book: &mut Book) -> error_stack::Result<(), KernelError> {
        if !book.status().is_available() {
            return Err(Report::new(KernelError::BookUnavailable)
                .attach_printable(format!("Book `{}` is already borrowed", book.id())));
        }
        book.set_status(BookStatus::Borrowed);
        self.held_books.insert(book.id().clone());
        Ok(())
    }

    /// Inverse of [`Patron::borrow_book`]. Rejected unless this patron holds `book`.
    pub fn return_book(&mut self, book: &mut Book) -> error_stack::Result<(), KernelError> {
        if !self.held_books.contains(book.id()) {
            return Err(
                Report::new(KernelError::NotBorrowedByPatron).attach_printable(format!(
                    "Patron `{}` does not hold book `{}`",
                    self.id,
                    book.id()
                )),
            );
        }
        book.set_status(BookStatus::Available);
        self.held_books.remove(book.id());
        Ok(())
    }
}
