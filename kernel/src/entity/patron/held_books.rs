use crate::entity::BookId;

/// Ids of the books a patron currently holds, in borrow order. Never contains duplicates.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HeldBooks(Vec<BookId>);

impl HeldBooks {
    pub fn contains(&self, id: &BookId) -> bool {
        self.0.contains(id)
    }

    pub(crate) fn insert(&mut self, id: BookId) {
        if !self.contains(&id) {
            self.0.push(id);
        }
    }

    pub(crate) fn remove(&mut self, id: &BookId) {
        self.0.retain(|held| held != id);
    }
}

impl IntoIterator for HeldBooks {
    type Item = BookId;
    type IntoIter = std::vec::IntoIter<BookId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
