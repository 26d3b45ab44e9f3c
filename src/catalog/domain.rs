pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, BookUpdateDto};
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn create_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn update_book(&self, req: &BookUpdateDto) -> LibraryResult<BookDto>;
    async fn delete_book(&self, isbn: i64) -> LibraryResult<bool>;
    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>>;
}
