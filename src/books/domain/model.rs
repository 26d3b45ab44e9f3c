use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

// BookEntity is the persisted form of a catalog record. The isbn is assigned by
// the store on first save and is the record's key from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<i64>,
    pub version: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(name: &str) -> Self {
        Self {
            isbn: None,
            version: 0,
            name: name.to_string(),
            author: None,
            publisher: None,
            language: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // builds the revision a store writes: new records start at version 0, stored ones bump it
    pub(crate) fn next_revision(&self, isbn: i64, now: NaiveDateTime) -> Self {
        let mut next = self.clone();
        if self.isbn.is_none() {
            next.version = 0;
            next.created_at = now;
        } else {
            next.version = self.version + 1;
        }
        next.isbn = Some(isbn);
        next.updated_at = now;
        next
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::books::domain::model::BookEntity;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("title");
        assert_eq!(None, book.isbn);
        assert_eq!("title", book.name.as_str());
        assert_eq!(0, book.version);
    }

    #[tokio::test]
    async fn test_should_assign_isbn_on_first_revision() {
        let now = Utc::now().naive_utc();
        let book = BookEntity::new("title").next_revision(7, now);
        assert_eq!(Some(7), book.isbn);
        assert_eq!(0, book.version);
        assert_eq!(now, book.created_at);
        assert_eq!(now, book.updated_at);
    }

    #[tokio::test]
    async fn test_should_bump_version_on_later_revisions() {
        let first = BookEntity::new("title").next_revision(7, Utc::now().naive_utc());
        let second = first.next_revision(7, Utc::now().naive_utc());
        assert_eq!(1, second.version);
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn test_should_skip_absent_isbn_when_serialized() {
        let json = serde_json::to_value(BookEntity::new("title")).expect("should serialize");
        assert!(json.get("isbn").is_none());
        assert!(json.get("author").is_none());
    }
}
