use async_trait::async_trait;
use tracing::{error, info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, BookUpdateDto};
use crate::books::repository::BookRepository;
use crate::books::validator::BookValidator;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
    book_validator: Box<dyn BookValidator>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      book_validator: Box<dyn BookValidator>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            book_validator,
        }
    }

    // isbn wins when it resolves, otherwise the request name is tried
    async fn find_update_target(&self, req: &BookUpdateDto) -> LibraryResult<Option<BookEntity>> {
        if let Some(isbn) = req.isbn {
            if let Some(book) = self.book_repository.find_by_id(isbn).await? {
                return Ok(Some(book));
            }
        }
        match req.name.as_deref() {
            Some(name) => self.book_repository.find_by_name(name).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn create_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        if !self.book_validator.is_available_for_create(book) {
            error!("book to create includes isbn {:?}", book.isbn);
            return Err(LibraryError::validation(
                "Please remove ISBN value for creating the book", Some("isbn_present".to_string())));
        }

        if self.book_repository.find_by_name(book.name.as_str()).await?.is_some() {
            warn!("book with name {} already exists in branch {}", book.name, self.branch_id);
            return Err(LibraryError::duplicate_key(
                format!("Book with name {} already exists, please use update", book.name).as_str()));
        }

        info!("saving the book with name {}", book.name);
        let saved = self.book_repository.save(&BookEntity::from(book)).await?;
        Ok(BookDto::from(&saved))
    }

    async fn update_book(&self, req: &BookUpdateDto) -> LibraryResult<BookDto> {
        let target = match self.find_update_target(req).await? {
            Some(target) => target,
            None => {
                error!("could not update the book with isbn {:?} or name {:?}", req.isbn, req.name);
                return Err(LibraryError::not_found("There is no book with current name or ISBN"));
            }
        };

        let mut book = BookDto::from(&target);
        if !self.book_validator.is_available_for_update(req, &mut book) {
            error!("no attribute to update for the book with isbn {:?}", target.isbn);
            return Err(LibraryError::validation(
                "At least put one attribute to update", Some("no_changes".to_string())));
        }

        if book.name != target.name {
            if let Some(other) = self.book_repository.find_by_name(book.name.as_str()).await? {
                if other.isbn != target.isbn {
                    warn!("cannot rename the book {:?} to {} held by {:?}", target.isbn, book.name, other.isbn);
                    return Err(LibraryError::duplicate_key(
                        format!("Book with name {} already exists", book.name).as_str()));
                }
            }
        }

        info!("updating the book with isbn {:?}", target.isbn);
        let saved = self.book_repository.save(&BookEntity::from(&book)).await?;
        Ok(BookDto::from(&saved))
    }

    async fn delete_book(&self, isbn: i64) -> LibraryResult<bool> {
        info!("deleting the book with isbn {}", isbn);
        match self.book_repository.delete_by_id(isbn).await {
            Ok(()) => Ok(true),
            Err(LibraryError::NotFound { .. }) => {
                // reported as a bad argument rather than NotFound, unlike update
                error!("there is no book with isbn {}", isbn);
                Err(LibraryError::validation(
                    "There is no book with given isbn", Some("unknown_isbn".to_string())))
            }
            Err(err) => Err(err),
        }
    }

    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await?;
        Ok(books.iter().map(BookDto::from).collect())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            isbn: other.isbn,
            version: other.version,
            name: other.name.to_string(),
            author: other.author.clone(),
            publisher: other.publisher.clone(),
            language: other.language.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            isbn: other.isbn,
            version: other.version,
            name: other.name.to_string(),
            author: other.author.clone(),
            publisher: other.publisher.clone(),
            language: other.language.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
