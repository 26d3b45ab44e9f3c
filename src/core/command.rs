use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

impl CommandError {
    pub fn reason_code(&self) -> Option<&str> {
        match self {
            CommandError::Access { reason_code, .. } |
            CommandError::Database { reason_code, .. } |
            CommandError::Runtime { reason_code, .. } |
            CommandError::Validation { reason_code, .. } => reason_code.as_deref(),
            _ => None,
        }
    }
}

// response body text: the message, followed by the reason code when one is attached
impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let message = match self {
            CommandError::Access { message, .. } |
            CommandError::Database { message, .. } |
            CommandError::DuplicateKey { message } |
            CommandError::NotFound { message } |
            CommandError::Runtime { message, .. } |
            CommandError::Serialization { message } |
            CommandError::Validation { message, .. } => message,
        };
        match self.reason_code() {
            Some(reason) => write!(f, "{} ({})", message, reason),
            None => write!(f, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_keep_catalog_reason_codes() {
        for reason in ["isbn_present", "no_changes", "unknown_isbn"] {
            let err = CommandError::from(LibraryError::validation("rejected", Some(reason.to_string())));
            assert!(matches!(err, CommandError::Validation { .. }));
            assert_eq!(Some(reason), err.reason_code());
            assert_eq!(format!("rejected ({})", reason), err.to_string());
        }
    }

    #[tokio::test]
    async fn test_should_map_store_rejection_to_validation() {
        let err = CommandError::from(LibraryError::database_or_unavailable(
            "ValidationException: empty key", Some("400 Bad Request".to_string()), false));
        assert!(matches!(err, CommandError::Validation { .. }));
        assert_eq!(Some("store_rejected"), err.reason_code());
    }

    #[tokio::test]
    async fn test_should_map_store_failures() {
        assert!(matches!(CommandError::from(LibraryError::duplicate_key("name Dune is taken")), CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(LibraryError::not_found("no book 42")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::unavailable("throttled", None, true)), CommandError::Runtime { retryable: true, .. }));
        assert!(matches!(CommandError::from(LibraryError::runtime("isbn sequence exhausted", None)), CommandError::Runtime { retryable: false, .. }));
        assert_eq!("name Dune is taken", CommandError::from(LibraryError::duplicate_key("name Dune is taken")).to_string());
    }
}
