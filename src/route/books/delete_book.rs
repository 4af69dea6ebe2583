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
    extractor::path::ApiPath,
    server_error,
    state::ApiState,
};

use super::book_not_found;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteBookResponse {
    #[schema(example = "Book deleted")]
    pub message: String,
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Deletes the book with the given isbn.
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "Book deleted", body = DeleteBookResponse),
        (status = 404, description = "No book with this isbn"),
    ),
    tag = "books"
)]
#[tracing::instrument(skip_all, fields(isbn = %isbn))]
pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<DeleteBookResponse, ApiError> {
    let deleted = state
        .books()
        .delete(&isbn)
        .await
        .map_err(server_error!(state))?;

    if !deleted {
        return Err(book_not_found(state.error_verbosity(), &isbn));
    }

    tracing::info!("Book deleted");

    Ok(DeleteBookResponse {
        message: "Book deleted".to_string(),
    })
}
