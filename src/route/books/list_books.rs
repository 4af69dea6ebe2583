use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{ApiError, ErrorVerbosityProvider},
    extractor::query::ApiQuery,
    server_error,
    state::ApiState,
    store::books::BookFilter,
    types::book::Book,
};

#[derive(Debug, Default, Deserialize, JsonSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBooksQuery {
    /// Exact author.
    pub author: Option<String>,
    /// Exact language.
    pub language: Option<String>,
    /// Exact publisher.
    pub publisher: Option<String>,
    /// Part of the title.
    pub title: Option<String>,
    /// Exact year of publication.
    pub year: Option<i32>,
}

impl From<ListBooksQuery> for BookFilter {
    fn from(query: ListBooksQuery) -> Self {
        BookFilter {
            author: query.author,
            language: query.language,
            publisher: query.publisher,
            title: query.title,
            year: query.year,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

impl IntoResponse for BooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Lists all books matching the optional filters.
#[utoipa::path(
    get,
    path = "/books",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Matching books", body = BooksResponse),
        (status = 400, description = "Invalid query parameters"),
    ),
    tag = "books"
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<ListBooksQuery>,
) -> Result<BooksResponse, ApiError> {
    let books = state
        .books()
        .list(&query.into())
        .await
        .map_err(server_error!(state))?;

    Ok(BooksResponse { books })
}
