use std::collections::BTreeMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

#[derive(Debug, Default)]
struct MemoryBooks {
    books: BTreeMap<i64, BookEntity>,
    last_isbn: i64,
}

/// In-memory book store.
///
/// Books are listed in isbn order. New isbns continue past the highest one
/// stored so far, including isbns given explicitly on upsert. Unlike the
/// DynamoDB store, a save that would give a second record the same name is
/// rejected with `DuplicateKey` while the write lock is held.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookRepository {
    inner: Arc<RwLock<MemoryBooks>>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<BookEntity, i64> for MemoryBookRepository {
    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let guard = self.inner.read().await;
        Ok(guard.books.get(&id).cloned())
    }

    async fn save(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut guard = self.inner.write().await;
        let taken = guard.books.values()
            .any(|other| other.name == entity.name && other.isbn != entity.isbn);
        if taken {
            return Err(LibraryError::duplicate_key(
                format!("book with name {} already exists", entity.name).as_str()));
        }
        let isbn = match entity.isbn {
            Some(isbn) => isbn,
            None => guard.last_isbn.checked_add(1)
                .ok_or_else(|| LibraryError::runtime("isbn sequence exhausted", None))?,
        };
        guard.last_isbn = guard.last_isbn.max(isbn);
        let saved = entity.next_revision(isbn, Utc::now().naive_utc());
        guard.books.insert(isbn, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> LibraryResult<()> {
        let mut guard = self.inner.write().await;
        guard.books.remove(&id).map(|_| ())
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let guard = self.inner.read().await;
        Ok(guard.books.values().cloned().collect())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_name(&self, name: &str) -> LibraryResult<Option<BookEntity>> {
        let guard = self.inner.read().await;
        Ok(guard.books.values().find(|b| b.name == name).cloned())
    }
}
