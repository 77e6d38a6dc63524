use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    DuplicateId,
    BookNotFound,
    PatronNotFound,
    BookUnavailable,
    NotBorrowedByPatron,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::DuplicateId => write!(f, "Id is already registered"),
            KernelError::BookNotFound => write!(f, "Book not found"),
            KernelError::PatronNotFound => write!(f, "Patron not found"),
            KernelError::BookUnavailable => write!(f, "Book is not available"),
            KernelError::NotBorrowedByPatron => write!(f, "Book is not borrowed by the patron"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
