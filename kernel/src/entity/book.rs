mod author;
mod id;
mod search;
mod status;
mod title;

pub use self::{author::*, id::*, search::*, status::*, title::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    status: BookStatus,
}

impl Book {
    /// Catalogued books always start out available.
    pub fn new(id: BookId, title: BookTitle, author: BookAuthor) -> Self {
        Self {
            id,
            title,
            author,
            status: BookStatus::Available,
        }
    }

    pub(crate) fn set_status(&mut self, status: BookStatus) {
        self.status = status;
    }
}
