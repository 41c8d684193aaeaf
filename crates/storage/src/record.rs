//! Record types persisted in the slot store.

use serde::{Deserialize, Serialize};

/// A unique identifier for a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A unique identifier for a borrow history entry.
///
/// Separate from [`BookId`]: the two namespaces never need to be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A book in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub category: String,
    #[serde(rename = "isBorrowed", default)]
    pub is_borrowed: bool,
}

impl Book {
    pub fn new(id: BookId, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            is_borrowed: false,
        }
    }
}

/// A single borrow, recorded when a book goes out.
///
/// The title is a snapshot; the entry outlives the book it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowEvent {
    pub id: EventId,
    pub title: String,
    pub date: String,
}

impl BorrowEvent {
    pub fn new(id: EventId, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            date: date.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_uses_camel_case_borrowed_flag() {
        let book = Book::new(BookId(1700000000000), "Dune", "Sci-Fi");
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(
            json,
            r#"{"id":1700000000000,"title":"Dune","category":"Sci-Fi","isBorrowed":false}"#
        );
    }

    #[test]
    fn borrow_event_reads_existing_format() {
        let json = r#"{"id":1700000000123,"title":"Dune","date":"3/14/2024"}"#;
        let event: BorrowEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, EventId(1700000000123));
        assert_eq!(event.title, "Dune");
        assert_eq!(event.date, "3/14/2024");
    }

    #[test]
    fn ids_parse_from_text() {
        assert_eq!("42".parse::<BookId>().unwrap(), BookId(42));
        assert!("abc".parse::<EventId>().is_err());
    }
}
