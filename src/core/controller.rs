use std::sync::Arc;
use axum::http::StatusCode;
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
    pub(crate) catalog: Arc<dyn CatalogService>,
}

impl AppState {
    pub async fn new(branch: &str, store: RepositoryStore) -> AppState {
        let config = Configuration::new(branch);
        let catalog = factory::create_catalog_service(&config, store).await;
        AppState {
            config,
            store,
            catalog: Arc::from(catalog),
        }
    }
}

pub(crate) type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Access { .. } => StatusCode::FORBIDDEN,
            CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Serialization { .. } | CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
            CommandError::Database { .. } | CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::catalog::domain::CatalogService;
    use crate::core::command::CommandError;
    use crate::core::controller::{AppState, json_to_server_error, ServerError};
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_map_command_errors_to_status() {
        let (status, body) = ServerError::from(CommandError::Validation { message: "At least put one attribute to update".to_string(), reason_code: Some("no_changes".to_string()) });
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("At least put one attribute to update (no_changes)", body);
        let (status, _) = ServerError::from(CommandError::DuplicateKey { message: "test".to_string() });
        assert_eq!(StatusCode::CONFLICT, status);
        let (status, _) = ServerError::from(CommandError::NotFound { message: "test".to_string() });
        assert_eq!(StatusCode::NOT_FOUND, status);
        let (status, _) = ServerError::from(CommandError::Database { message: "test".to_string(), reason_code: None, retryable: false });
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
        let (status, _) = ServerError::from(CommandError::Access { message: "test".to_string(), reason_code: None });
        assert_eq!(StatusCode::FORBIDDEN, status);
    }

    #[tokio::test]
    async fn test_should_map_json_error_to_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("should fail");
        let (status, _) = json_to_server_error(err);
        assert_eq!(StatusCode::BAD_REQUEST, status);
    }

    #[tokio::test]
    async fn test_should_build_in_memory_state() {
        let state = AppState::new("test", RepositoryStore::InMemory).await;
        assert_eq!("test", state.config.branch_id.as_str());
        assert_eq!(RepositoryStore::InMemory, state.store);
        let books = state.catalog.get_all_books().await.expect("should list books");
        assert!(books.is_empty());
    }
}
