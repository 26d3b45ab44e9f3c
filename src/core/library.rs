use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    // A record with the same unique key (isbn or name) is already stored.
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The store could not serve the request right now, e.g. throttling or a timeout.
    // The caller can retry with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // The request itself is malformed, e.g. an isbn on create or nothing to change on update.
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    // classifies a store failure by the HTTP status carried in `reason`
    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            return LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true);
        }
        let status = reason.clone().unwrap_or_default();
        match status.as_str() {
            status if status.contains("404") => {
                LibraryError::not_found(format!("not found error {:?} {:?}", message, reason).as_str())
            }
            status if status.contains("403") => {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            }
            status if status.contains("400") => {
                LibraryError::validation(
                    format!("store rejected request {:?}", message).as_str(), Some("store_rejected".to_string()))
            }
            _ => {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::AccessDenied { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }

    // machine readable reason attached to validation failures
    pub fn reason_code(&self) -> Option<&str> {
        match self {
            LibraryError::Database { reason_code, .. } => { reason_code.as_deref() }
            LibraryError::AccessDenied { reason_code, .. } => { reason_code.as_deref() }
            LibraryError::CurrentlyUnavailable { reason_code, .. } => { reason_code.as_deref() }
            LibraryError::Validation { reason_code, .. } => { reason_code.as_deref() }
            LibraryError::Runtime { reason_code, .. } => { reason_code.as_deref() }
            _ => { None }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// Result of every store and catalog operation.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// One page of a store scan; `next_page` is the opaque token for the following page.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub next_page: Option<String>,
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult { next_page, records }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{LibraryError, PaginatedResult};

    fn rejection(message: &str, reason: &str) -> LibraryError {
        LibraryError::validation(message, Some(reason.to_string()))
    }

    #[tokio::test]
    async fn test_should_expose_catalog_reason_codes() {
        for reason in ["isbn_present", "no_changes", "unknown_isbn"] {
            let err = rejection("rejected", reason);
            assert_eq!(Some(reason), err.reason_code());
            assert!(!err.retryable());
        }
        assert_eq!(None, LibraryError::duplicate_key("name Dune is taken").reason_code());
        assert_eq!(None, LibraryError::not_found("no book 42").reason_code());
    }

    #[tokio::test]
    async fn test_should_map_store_bad_request_to_validation() {
        let err = LibraryError::database_or_unavailable(
            "ValidationException: empty key", Some("400 Bad Request".to_string()), false);
        assert!(matches!(err, LibraryError::Validation { .. }));
        assert_eq!(Some("store_rejected"), err.reason_code());
    }

    #[tokio::test]
    async fn test_should_map_store_status_codes() {
        assert!(matches!(LibraryError::database_or_unavailable("throttled", Some("400 Bad Request".to_string()), true),
            LibraryError::CurrentlyUnavailable { retryable: true, .. }));
        assert!(matches!(LibraryError::database_or_unavailable("missing table", Some("404 Not Found".to_string()), false),
            LibraryError::NotFound { .. }));
        assert!(matches!(LibraryError::database_or_unavailable("no grant", Some("403 Forbidden".to_string()), false),
            LibraryError::AccessDenied { .. }));
        assert!(matches!(LibraryError::database_or_unavailable("broken", Some("ConstructionFailure".to_string()), false),
            LibraryError::Database { retryable: false, .. }));
        assert!(matches!(LibraryError::database_or_unavailable("broken", None, false),
            LibraryError::Database { .. }));
    }

    #[tokio::test]
    async fn test_should_convert_json_error() {
        let err = serde_json::from_str::<i64>("not a number").expect_err("should fail");
        assert!(matches!(LibraryError::from(err), LibraryError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_should_display_message_and_reason() {
        let err = rejection("Please remove ISBN value for creating the book", "isbn_present");
        assert_eq!("Please remove ISBN value for creating the book Some(\"isbn_present\")", err.to_string());
    }

    #[tokio::test]
    async fn test_should_carry_next_page_token() {
        let res = PaginatedResult::new(Some("{\"isbn\":{\"N\":\"3\"}}".to_string()), vec![1, 2, 3]);
        assert_eq!(3, res.records.len());
        assert!(res.next_page.is_some());
    }
}
