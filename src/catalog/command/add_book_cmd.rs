use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    // accepted only so that a client sending one gets a validation error
    #[serde(default)]
    pub(crate) isbn: Option<i64>,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) author: Option<String>,
    #[serde(default)]
    pub(crate) publisher: Option<String>,
    #[serde(default)]
    pub(crate) language: Option<String>,
}

impl AddBookCommandRequest {
    pub fn new(name: &str, author: &str) -> Self {
        Self {
            isbn: None,
            name: name.to_string(),
            author: Some(author.to_string()),
            publisher: None,
            language: None,
        }
    }

    pub fn build_book(&self) -> BookDto {
        let mut book = BookDto::new(self.name.as_str());
        book.isbn = self.isbn;
        book.author = self.author.clone();
        book.publisher = self.publisher.clone();
        book.language = self.language.clone();
        book
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.create_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
