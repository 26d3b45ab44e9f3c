use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity, Key>: Sync + Send {
    // get an entity by its key
    async fn find_by_id(&self, id: Key) -> LibraryResult<Option<Entity>>;

    // inserts the entity, assigning a key when it has none, or overwrites the stored one
    async fn save(&self, entity: &Entity) -> LibraryResult<Entity>;

    // delete an entity, fails with NotFound if the key is absent
    async fn delete_by_id(&self, id: Key) -> LibraryResult<()>;

    // all stored entities in store order
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    // CATALOG_STORE selects the store: dynamodb, local or memory
    pub fn from_env(default: RepositoryStore) -> RepositoryStore {
        match std::env::var("CATALOG_STORE").as_deref() {
            Ok("dynamodb") => RepositoryStore::DynamoDB,
            Ok("local") => RepositoryStore::LocalDynamoDB,
            Ok("memory") => RepositoryStore::InMemory,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_fallback_to_default_store() {
        std::env::remove_var("CATALOG_STORE");
        assert_eq!(RepositoryStore::InMemory, RepositoryStore::from_env(RepositoryStore::InMemory));
        assert_eq!(RepositoryStore::LocalDynamoDB, RepositoryStore::from_env(RepositoryStore::LocalDynamoDB));
    }
}
