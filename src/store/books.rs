use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::types::book::Book;

const SELECT_BOOKS: &str =
    "SELECT isbn, amazon_url, author, language, pages, publisher, title, year FROM books";

const RETURNING_BOOK: &str =
    " RETURNING isbn, amazon_url, author, language, pages, publisher, title, year";

/// Narrows the result of [`BookStore::list`].
///
/// `title` matches as a substring, every other field must match exactly.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub author: Option<String>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

/// Escapes the `LIKE` wildcards of `value`, so it only matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Data access for the `books` table.
///
/// Every operation is a single statement.
#[derive(Debug, Clone)]
pub struct BookStore {
    pool: SqlitePool,
}

impl BookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_BOOKS);
        let mut prefix = " WHERE ";

        for (column, value) in [
            ("author", &filter.author),
            ("language", &filter.language),
            ("publisher", &filter.publisher),
        ] {
            if let Some(value) = value {
                builder
                    .push(prefix)
                    .push(column)
                    .push(" = ")
                    .push_bind(value.clone());
                prefix = " AND ";
            }
        }

        if let Some(title) = &filter.title {
            builder
                .push(prefix)
                .push("title LIKE '%' || ")
                .push_bind(escape_like(title))
                .push(" || '%' ESCAPE '\\'");
            prefix = " AND ";
        }

        if let Some(year) = filter.year {
            builder.push(prefix).push("year = ").push_bind(year);
        }

        builder.push(" ORDER BY title");

        let books = builder.build_query_as::<Book>().fetch_all(&self.pool).await?;

        tracing::debug!(count = books.len(), "Listed");

        Ok(books)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, isbn: &str) -> Result<Option<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(&format!("{SELECT_BOOKS} WHERE isbn = ?"))
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
    }

    #[tracing::instrument(skip_all, fields(isbn = %book.isbn))]
    pub async fn create(&self, book: &Book) -> Result<Book, sqlx::Error> {
        sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?){RETURNING_BOOK}"
        ))
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await
    }

    /// Replaces every non-key field of the book stored under `isbn`.
    ///
    /// Returns `None` if no such book exists. The `isbn` of `book` is ignored.
    #[tracing::instrument(skip(self, book))]
    pub async fn update(&self, isbn: &str, book: &Book) -> Result<Option<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET amazon_url = ?, author = ?, language = ?, pages = ?, \
             publisher = ?, title = ?, year = ? WHERE isbn = ?{RETURNING_BOOK}"
        ))
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns `false` if no book with `isbn` existed.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, isbn: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = ?")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
