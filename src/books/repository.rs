pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

// BookRepository is keyed by isbn and also resolves books by their unique name.
#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity, i64> {
    async fn find_by_name(&self, name: &str) -> LibraryResult<Option<BookEntity>>;
}
