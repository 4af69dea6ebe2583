use axum::extract::State;

use crate::{
    error::{ApiError, ErrorVerbosityProvider, ValidationError},
    extractor::{path::ApiPath, schema_validated::SchemaValidated},
    server_error,
    state::ApiState,
    types::book::Book,
};

use super::{book_not_found, BookResponse};

/// Replaces every field but the isbn of an existing book.
///
/// The isbn is immutable, the body must carry the same isbn as the path.
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Body does not conform to the book schema"),
        (status = 404, description = "No book with this isbn"),
    ),
    tag = "books"
)]
#[tracing::instrument(skip_all, fields(isbn = %isbn))]
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
    SchemaValidated(book): SchemaValidated<Book>,
) -> Result<BookResponse, ApiError> {
    let verbosity = state.error_verbosity();

    if book.isbn != isbn {
        tracing::warn!(body_isbn = %book.isbn, "Attempted isbn change");

        return Err(ValidationError::new(
            verbosity,
            [format!(
                "instance.isbn must equal '{isbn}', the isbn of a book can not be changed"
            )],
        )
        .into());
    }

    let book = state
        .books()
        .update(&isbn, &book)
        .await
        .map_err(server_error!(state))?
        .ok_or_else(|| book_not_found(verbosity, &isbn))?;

    tracing::info!("Book updated");

    Ok(BookResponse { book })
}
