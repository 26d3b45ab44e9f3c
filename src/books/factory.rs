use aws_sdk_dynamodb::types::ScalarAttributeType;
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::books::validator::{BookValidator, FieldBookValidator};
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_book_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, config))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, config.books_table.as_str(), "isbn", ScalarAttributeType::N, Some("name")).await;
            let _ = create_table(&client, config.counters_table.as_str(), "counter_id", ScalarAttributeType::S, None).await;
            Box::new(DDBBookRepository::new(client, config))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryBookRepository::new())
        }
    }
}

pub(crate) fn create_book_validator() -> Box<dyn BookValidator> {
    Box::new(FieldBookValidator::new())
}
