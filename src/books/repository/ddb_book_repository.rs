use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{from_ddb, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, to_ddb_page};

const BOOKS_COUNTER: &str = "books";

// DDBBookRepository stores books keyed by a numeric isbn, with a GSI on name. Isbns come
// from an atomic counter item; the name check on create is read-then-write and not atomic.
#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
    counters_table: String,
    page_size: usize,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, config: &Configuration) -> Self {
        Self {
            client,
            table_name: config.books_table.to_string(),
            index_name: config.books_index.to_string(),
            counters_table: config.counters_table.to_string(),
            page_size: config.scan_page_size,
        }
    }

    async fn next_isbn(&self) -> LibraryResult<i64> {
        let counters_table: &str = self.counters_table.as_ref();
        let res = self.client
            .update_item()
            .table_name(counters_table)
            .key("counter_id", AttributeValue::S(BOOKS_COUNTER.to_string()))
            .update_expression("ADD seq :incr")
            .expression_attribute_values(":incr", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await.map_err(LibraryError::from)?;
        res.attributes()
            .and_then(|attrs| parse_number_attribute("seq", attrs))
            .ok_or_else(|| LibraryError::runtime("isbn counter returned no value", None))
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let exclusive_start_key = to_ddb_page(page);
        self.client
            .scan()
            .table_name(table_name)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .limit(cmp::min(page_size, 500) as i32)
            .send()
            .await.map_err(LibraryError::from).map(|req| {
            let def_items = vec![];
            let items = req.items.as_ref().unwrap_or(&def_items);
            let records = items.iter().map(map_to_book).collect();
            from_ddb(req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl Repository<BookEntity, i64> for DDBBookRepository {
    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .get_item()
            .table_name(table_name)
            .key("isbn", AttributeValue::N(id.to_string()))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from).map(|res| res.item().map(map_to_book))
    }

    async fn save(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let isbn = match entity.isbn {
            Some(isbn) => isbn,
            None => self.next_isbn().await?,
        };
        let saved = entity.next_revision(isbn, Utc::now().naive_utc());
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(&saved)?;
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map_err(LibraryError::from)?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> LibraryResult<()> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client.delete_item()
            .table_name(table_name)
            .key("isbn", AttributeValue::N(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await.map_err(LibraryError::from)?;
        // a missing item comes back without old attributes
        match res.attributes() {
            Some(old) if !old.is_empty() => Ok(()),
            _ => Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
        }
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let mut books = vec![];
        let mut next_page: Option<String> = None;
        loop {
            let res = self.scan(next_page.as_deref(), self.page_size).await?;
            books.extend(res.records);
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        Ok(books)
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    // Note `name` is a reserved word per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn find_by_name(&self, name: &str) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(2)
            .consistent_read(false)
            .key_condition_expression("#name = :name")
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":name", AttributeValue::S(name.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            match req.items.as_deref() {
                Some([]) | None => Ok(None),
                Some([item]) => Ok(Some(map_to_book(item))),
                Some(_) => Err(LibraryError::database(format!("too many books for {}", name).as_str(), None, false)),
            }
        })
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        isbn: parse_number_attribute("isbn", map),
        version: parse_number_attribute("version", map).unwrap_or(0),
        name: parse_string_attribute("name", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map),
        publisher: parse_string_attribute("publisher", map),
        language: parse_string_attribute("language", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use aws_sdk_dynamodb::types::ScalarAttributeType;
    use lazy_static::lazy_static;
    use uuid::Uuid;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::ddb_book_repository::DDBBookRepository;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "books").await;
                let _ = create_table(&client, "books", "isbn", ScalarAttributeType::N, Some("name")).await;
                let _ = create_table(&client, "counters", "counter_id", ScalarAttributeType::S, None).await;
                client
            });
    }

    async fn books_repo() -> DDBBookRepository {
        DDBBookRepository::new(CLIENT.get().await.clone(), &Configuration::new("test"))
    }

    fn unique_name(prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local"]
    async fn test_should_create_get_books() {
        let books_repo = books_repo().await;
        let book = books_repo.save(&BookEntity::new(unique_name("test book").as_str())).await.expect("should create book");
        let isbn = book.isbn.expect("should assign isbn");

        let loaded = books_repo.find_by_id(isbn).await.expect("should query book").expect("should return book");
        assert_eq!(book.name, loaded.name);
        let by_name = books_repo.find_by_name(book.name.as_str()).await.expect("should query book").expect("should return book");
        assert_eq!(book.isbn, by_name.isbn);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local"]
    async fn test_should_create_update_books() {
        let books_repo = books_repo().await;
        let mut book = books_repo.save(&BookEntity::new(unique_name("test book").as_str())).await.expect("should create book");

        book.author = Some("new author".to_string());
        let updated = books_repo.save(&book).await.expect("should update book");
        assert_eq!(1, updated.version);

        let loaded = books_repo.find_by_id(book.isbn.expect("isbn")).await.expect("should query book").expect("should return book");
        assert_eq!(book.author, loaded.author);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local"]
    async fn test_should_create_list_books() {
        let books_repo = books_repo().await;
        let mut created = vec![];
        for _ in 0..5 {
            let book = books_repo.save(&BookEntity::new(unique_name("title").as_str())).await.expect("should create book");
            created.push(book.isbn);
        }
        let all = books_repo.find_all().await.expect("should list books");
        for isbn in created {
            assert!(all.iter().any(|b| b.isbn == isbn));
        }
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local"]
    async fn test_should_create_delete_books() {
        let books_repo = books_repo().await;
        let book = books_repo.save(&BookEntity::new(unique_name("test book").as_str())).await.expect("should create book");
        let isbn = book.isbn.expect("should assign isbn");

        books_repo.delete_by_id(isbn).await.expect("should delete book");
        assert!(books_repo.find_by_id(isbn).await.expect("should query book").is_none());

        let res = books_repo.delete_by_id(isbn).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }
}
