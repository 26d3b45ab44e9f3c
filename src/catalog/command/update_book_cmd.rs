use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, BookUpdateDto};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
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

impl UpdateBookCommandRequest {
    pub fn new(isbn: Option<i64>, name: Option<&str>, author: Option<&str>) -> Self {
        Self {
            isbn,
            name: name.map(str::to_string),
            author: author.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn build_update(&self) -> BookUpdateDto {
        BookUpdateDto {
            isbn: self.isbn,
            name: self.name.clone(),
            author: self.author.clone(),
            publisher: self.publisher.clone(),
            language: self.language.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let update = req.build_update();
        self.catalog_service.update_book(&update).await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    async fn catalog_svc() -> Arc<dyn CatalogService> {
        Arc::from(factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await)
    }

    #[tokio::test]
    async fn test_should_run_update_book() {
        let svc = catalog_svc().await;
        let add_cmd = AddBookCommand::new(svc.clone());
        let update_cmd = UpdateBookCommand::new(svc);

        let added = add_cmd.execute(AddBookCommandRequest::new("Dune", "Frank Herbert"))
            .await.expect("should add book");
        let req = UpdateBookCommandRequest::new(added.book.isbn, None, Some("F. Herbert"));
        let res = update_cmd.execute(req).await.expect("should update book");
        assert_eq!(added.book.isbn, res.book.isbn);
        assert_eq!(Some("F. Herbert"), res.book.author.as_deref());
    }

    #[tokio::test]
    async fn test_should_fail_update_of_unknown_book() {
        let update_cmd = UpdateBookCommand::new(catalog_svc().await);

        let res = update_cmd.execute(UpdateBookCommandRequest::new(Some(42), None, Some("anyone"))).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
