#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl BookStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, BookStatus::Available)
    }
}
