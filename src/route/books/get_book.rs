use axum::extract::State;

use crate::{
    error::{ApiError, ErrorVerbosityProvider},
    extractor::path::ApiPath,
    server_error,
    state::ApiState,
};

use super::{book_not_found, BookResponse};

/// Returns the book with the given isbn.
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "The book", body = BookResponse),
        (status = 404, description = "No book with this isbn"),
    ),
    tag = "books"
)]
#[tracing::instrument(skip_all, fields(isbn = %isbn))]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<BookResponse, ApiError> {
    let book = state
        .books()
        .get(&isbn)
        .await
        .map_err(server_error!(state))?
        .ok_or_else(|| book_not_found(state.error_verbosity(), &isbn))?;

    Ok(BookResponse { book })
}
