include!("../../lib.rs");
use axum::{
    routing::{delete, post},
    Router,
};
use lambda_http::{run, Error};
use crate::utils::ddb::setup_tracing;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::catalog::controller::{add_book, list_books, remove_book, update_book};

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::new("dev", RepositoryStore::from_env(RepositoryStore::LocalDynamoDB)).await
    } else {
        AppState::new("prod", RepositoryStore::from_env(RepositoryStore::DynamoDB)).await
    };
    tracing::info!("starting catalog for branch {} on {:?}", state.config.branch_id, state.store);

    let app = Router::new()
        .route("/books",
               post(add_book).put(update_book).get(list_books))
        .route("/books/:isbn", delete(remove_book))
        .with_state(state);

    run(app).await
}
