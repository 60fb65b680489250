//! API integration tests against the router backed by in-memory storage

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use livraria_server::{api::create_router, repository::Repository, AppConfig, AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default(), Repository::in_memory()))
}

/// Send one request through the router, returning status and parsed body
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

async fn register(app: &Router, title: &str, author: &str, isbn: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": title, "author": author, "isbn": isbn })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_register_book() {
    let app = app();
    let body = register(&app, "Codando", "Ivan", "27062001").await;

    assert!(body["id"].is_number());
    assert_eq!(body["title"], "Codando");
    assert_eq!(body["author"], "Ivan");
    assert_eq!(body["isbn"], "27062001");
}

#[tokio::test]
async fn test_register_invalid_book() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/books", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(3));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "", "author": "Ivan", "isbn": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["title must not be empty"]));
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicated_isbn() {
    let app = app();
    register(&app, "Codando", "Ivan", "27062001").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Outro", "author": "Maria", "isbn": "27062001" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["ISBN already registered."] }));
}

#[tokio::test]
async fn test_get_book_by_id() {
    let app = app();
    let created = register(&app, "Codando para o núcleo", "Ivan Júnior", "27062001").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_malformed_path_and_query_use_error_body() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, Method::DELETE, "/api/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].is_array());

    let (status, body) = send(&app, Method::GET, "/api/books?page=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].is_array());
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let created = register(&app, "Codando", "Ivan", "27062001").await;
    let uri = format!("/api/books/{}", created["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_lent_book() {
    let app = app();
    let created = register(&app, "Codando", "Ivan", "27062001").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/loans",
        Some(json!({ "isbn": "27062001", "customer": "Ivan" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/books/{}", created["id"]);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_book_keeps_isbn_and_id() {
    let app = app();
    let created = register(&app, "Codando", "Ivan", "27062001").await;
    let uri = format!("/api/books/{}", created["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "id": 77, "title": "Codando 2", "author": "Ivan J.", "isbn": "changed" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["isbn"], "27062001");
    assert_eq!(body["title"], "Codando 2");
    assert_eq!(body["author"], "Ivan J.");

    let (_, stored) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(stored, body);
}

#[tokio::test]
async fn test_update_unknown_book() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/books/999",
        Some(json!({ "title": "T", "author": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_books_filters_by_title() {
    let app = app();
    register(&app, "Harry Potter", "Rowling", "001").await;
    register(&app, "The Hobbit", "Tolkien", "002").await;
    register(&app, "Dirty HARRY", "Someone", "003").await;

    let (status, body) = send(&app, Method::GET, "/api/books?title=harry", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 2);
    let isbns: Vec<&str> = body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["isbn"].as_str().unwrap())
        .collect();
    assert_eq!(isbns, vec!["001", "003"]);
}

#[tokio::test]
async fn test_list_books_filter_value_is_not_trimmed() {
    let app = app();
    register(&app, "Dirty Harry", "Someone", "001").await;
    register(&app, "Harry Potter", "Rowling", "002").await;

    let (status, body) = send(&app, Method::GET, "/api/books?title=Harry%20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["isbn"], "002");

    let (_, body) = send(&app, Method::GET, "/api/books?title=%20%20", None).await;
    assert_eq!(body["totalElements"], 2);
}

#[tokio::test]
async fn test_list_books_pages_through_everything() {
    let app = app();
    for i in 0..5 {
        register(&app, &format!("Book {}", i), "Author", &format!("isbn-{}", i)).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/books?page=1&size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["pageable"]["pageNumber"], 1);
    assert_eq!(body["pageable"]["pageSize"], 2);
    assert_eq!(body["content"][0]["isbn"], "isbn-2");
    assert_eq!(body["content"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_create_loan() {
    let app = app();
    register(&app, "Codando", "Ivan", "27062001").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/loans",
        Some(json!({ "isbn": "27062001", "customer": "Ivan" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!(1));
}

#[tokio::test]
async fn test_create_loan_unknown_isbn() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/loans",
        Some(json!({ "isbn": "does-not-exist", "customer": "Ivan" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Book not found for passed isbn"]));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
}
