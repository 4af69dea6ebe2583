use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ErrorVerbosity, NotFoundError},
    types::book::Book,
};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

fn book_not_found(verbosity: ErrorVerbosity, isbn: &str) -> ApiError {
    NotFoundError::with_reason(verbosity, format!("There is no book with an isbn '{isbn}'")).into()
}
