use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ErrorVerbosityProvider},
    extractor::schema_validated::SchemaValidated,
    server_error,
    state::ApiState,
    types::book::Book,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Creates a new book.
#[utoipa::path(
    post,
    path = "/books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = CreateBookResponse),
        (status = 400, description = "Body does not conform to the book schema"),
    ),
    tag = "books"
)]
#[tracing::instrument(skip_all, fields(isbn = %book.isbn))]
pub async fn create_book(
    State(state): State<ApiState>,
    SchemaValidated(book): SchemaValidated<Book>,
) -> Result<CreateBookResponse, ApiError> {
    let book = state
        .books()
        .create(&book)
        .await
        .map_err(server_error!(state))?;

    tracing::info!("Book created");

    Ok(CreateBookResponse { book })
}
