use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    error::ErrorVerbosity,
    server::{app, ServerConfig},
    state::ApiState,
    store::books::{
        tests::{godel_escher_bach, memory_store, power_up},
        BookStore,
    },
    types::book::Book,
};

#[tokio::test]
async fn example_config_is_valid() {
    ServerConfig::from_config_file("config.example.yaml")
        .await
        .expect("Example config is not parsable");
}

#[test]
fn database_url_is_masked_in_debug_output() {
    let config = ServerConfig::from_yaml(
        "socket_address: 127.0.0.1:5000\n\
         error_verbosity: Full\n\
         database:\n  url: sqlite://secret.db\n",
    )
    .expect("Config is not parsable");

    let debug = format!("{config:?}");

    assert!(!debug.contains("secret"));
    assert!(debug.contains("max_connections: 5"));
}

/// A router over a fresh in-memory database seeded with [`power_up`].
async fn seeded_app() -> (Router, BookStore) {
    let store = memory_store().await;

    store
        .create(&power_up())
        .await
        .expect("Seed book must be insertable");

    let state = ApiState::new(ErrorVerbosity::Full, store.clone());

    (app(state), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Request must be buildable");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body must be collectable")
        .to_bytes();

    let body = match bytes.is_empty() {
        true => Value::Null,
        false => serde_json::from_slice(&bytes).expect("Body must be JSON"),
    };

    (status, body)
}

fn to_json(book: &Book) -> Value {
    serde_json::to_value(book).expect("Book must be serializable")
}

#[tokio::test]
async fn lists_books() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [to_json(&power_up())] }));
}

#[tokio::test]
async fn lists_books_with_filters() {
    let (app, store) = seeded_app().await;
    store.create(&godel_escher_bach()).await.unwrap();

    let (status, body) = send(&app, Method::GET, "/books?author=Douglas%20Hofstadter", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [to_json(&godel_escher_bach())] }));

    let (status, body) = send(&app, Method::GET, "/books?year=2017&title=Power", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [to_json(&power_up())] }));
}

#[tokio::test]
async fn rejects_unparsable_query() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::GET, "/books?year=last", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Query");
}

#[tokio::test]
async fn gets_a_single_book() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::GET, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": to_json(&power_up()) }));
}

#[tokio::test]
async fn get_responds_with_404_for_unknown_isbn() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::GET, "/books/000000000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
    assert_eq!(
        body["error"]["not_found_reason"],
        "There is no book with an isbn '000000000'"
    );
}

#[tokio::test]
async fn creates_a_book() {
    let (app, store) = seeded_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(to_json(&godel_escher_bach())),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "book": to_json(&godel_escher_bach()) }));

    let (status, body) = send(&app, Method::GET, "/books/0465026567", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": to_json(&godel_escher_bach()) }));
    assert_eq!(store.list(&Default::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_reports_all_schema_violations_and_persists_nothing() {
    let (app, store) = seeded_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({
            "isbn": "069116148",
            "amazon_url": "http://a.co/ortX2",
            "author": "Tarvistesting",
            "pages": "444",
            "publisher": "Priceon University Pressssss",
            "title": "Power-player",
            "year": 2014
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert_eq!(
        body["error"]["validation_errors"],
        "instance requires property \"language\", instance.pages is not of a type(s) integer"
    );
    assert_eq!(store.get("069116148").await.unwrap(), None);
}

#[tokio::test]
async fn create_applies_field_rules() {
    let (app, store) = seeded_app().await;

    let invalid = Book {
        isbn: "".to_string(),
        pages: 0,
        ..godel_escher_bach()
    };

    let (status, body) = send(&app, Method::POST, "/books", Some(to_json(&invalid))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["validation_errors"],
        "instance.isbn must not be empty, instance.pages must be at least 1"
    );
    assert_eq!(store.list(&Default::default()).await.unwrap(), vec![power_up()]);
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let (app, _) = seeded_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"isbn\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_duplicate_isbn_is_a_server_error() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::POST, "/books", Some(to_json(&power_up()))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_type"], "InternalServerError");
}

#[tokio::test]
async fn updates_a_book() {
    let (app, _) = seeded_app().await;

    let replacement = Book {
        amazon_url: "http://a.co/ortX223".to_string(),
        author: "Tarvistestings".to_string(),
        language: "dutchess".to_string(),
        pages: 4424,
        publisher: "Priceon University Pressssssest".to_string(),
        title: "Power-player: Unlocking the Hidden Mathematics yo in Video Games".to_string(),
        year: 2013,
        ..power_up()
    };

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/0691161518",
        Some(to_json(&replacement)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": to_json(&replacement) }));

    let (_, body) = send(&app, Method::GET, "/books/0691161518", None).await;

    assert_eq!(body, json!({ "book": to_json(&replacement) }));
}

#[tokio::test]
async fn update_responds_with_404_for_unknown_isbn() {
    let (app, _) = seeded_app().await;

    let missing = Book {
        isbn: "02222222".to_string(),
        ..power_up()
    };

    let (status, _) = send(&app, Method::PUT, "/books/02222222", Some(to_json(&missing))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rejects_isbn_change() {
    let (app, store) = seeded_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/0691161518",
        Some(to_json(&godel_escher_bach())),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert_eq!(store.get("0691161518").await.unwrap(), Some(power_up()));
}

#[tokio::test]
async fn update_validates_body() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/0691161518",
        Some(json!({ "isbn": "0691161518", "year": "2013" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert_eq!(
        body["error"]["validation_errors"],
        "instance requires property \"amazon_url\", \
         instance requires property \"author\", \
         instance requires property \"language\", \
         instance requires property \"pages\", \
         instance requires property \"publisher\", \
         instance requires property \"title\", \
         instance.year is not of a type(s) integer"
    );
}

#[tokio::test]
async fn deletes_a_book() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::DELETE, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let (status, _) = send(&app, Method::GET, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_responds_with_404_for_unknown_isbn() {
    let (app, _) = seeded_app().await;

    let (status, _) = send(&app, Method::DELETE, "/books/000000000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::GET, "/authors", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::PATCH, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error_type"], "MethodNotAllowed");
}

#[tokio::test]
async fn serves_openapi_document() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/{isbn}"].is_object());
}
