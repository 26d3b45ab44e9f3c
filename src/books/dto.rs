use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<i64>,
    pub version: i64,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(name: &str) -> BookDto {
        BookDto {
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

    pub fn with_author(mut self, author: &str) -> BookDto {
        self.author = Some(author.to_string());
        self
    }
}

// BookUpdateDto locates a book by isbn or name and carries the values to change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookUpdateDto {
    #[serde(default)]
    pub isbn: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl BookUpdateDto {
    pub fn by_isbn(isbn: i64) -> BookUpdateDto {
        BookUpdateDto {
            isbn: Some(isbn),
            ..Default::default()
        }
    }

    pub fn by_name(name: &str) -> BookUpdateDto {
        BookUpdateDto {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}
