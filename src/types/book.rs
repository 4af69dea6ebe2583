use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A book, uniquely identified by its `isbn`.
///
/// Doubles as the request body of create and update and as the database row.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    ToSchema,
    Validate,
    sqlx::FromRow,
)]
pub struct Book {
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "0691161518")]
    pub isbn: String,
    #[validate(url(message = "must be a valid url"))]
    #[schema(example = "http://a.co/eobPtX2")]
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}
