use serde::{Deserialize, Serialize};

use crate::entity::Book;

/// Book field a catalog search is matched against.
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    /// Case-insensitive substring match. An empty query matches every book.
    pub fn matches(&self, book: &Book, query: &str) -> bool {
        let haystack: &String = match self {
            SearchField::Title => book.title().as_ref(),
            SearchField::Author => book.author().as_ref(),
        };
        haystack.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{Book, BookAuthor, BookId, BookTitle, SearchField};

    fn dune() -> Book {
        Book::new(
            BookId::new("978-2"),
            BookTitle::new("Dune"),
            BookAuthor::new("Frank Herbert"),
        )
    }

    #[test]
    fn title_match_ignores_case() {
        let book = dune();
        assert!(SearchField::Title.matches(&book, "dUN"));
        assert!(!SearchField::Title.matches(&book, "herbert"));
    }

    #[test]
    fn author_match_is_substring() {
        let book = dune();
        assert!(SearchField::Author.matches(&book, "HERB"));
        assert!(!SearchField::Author.matches(&book, "Orwell"));
    }

    #[test]
    fn empty_query_matches_everything() {
        let book = dune();
        assert!(SearchField::Title.matches(&book, ""));
        assert!(SearchField::Author.matches(&book, ""));
    }

    #[test]
    fn parses_lowercase_names() {
        let field: SearchField = serde_json::from_str("\"author\"").unwrap();
        assert_eq!(field, SearchField::Author);
        assert_eq!(SearchField::default(), SearchField::Title);
    }
}
