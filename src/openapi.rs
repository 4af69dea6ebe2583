use axum::Router;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    route::books::{
        create_book::CreateBookResponse, delete_book::DeleteBookResponse,
        list_books::BooksResponse, BookResponse,
    },
    types::book::Book,
};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::route::books::list_books::list_books,
        crate::route::books::get_book::get_book,
        crate::route::books::create_book::create_book,
        crate::route::books::update_book::update_book,
        crate::route::books::delete_book::delete_book,
    ),
    components(schemas(
        Book,
        BookResponse,
        BooksResponse,
        CreateBookResponse,
        DeleteBookResponse
    )),
    tags((name = "books", description = "Create, read, update and delete books"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document together with Swagger UI, Redoc and RapiDoc.
pub fn docs<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
}
