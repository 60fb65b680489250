//! Book (catalog) endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDto, BookFilter, BookPage, BookQuery, CreateBook, PageRequest, UpdateBook},
    AppState,
};

async fn load_book(state: &AppState, id: i64) -> AppResult<Book> {
    state
        .services
        .catalog
        .get_book(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
}

/// List books matching the filter, paged
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Page of books", body = BookPage)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> AppResult<Json<BookPage>> {
    let Query(query) = query?;
    let filter = BookFilter::from(&query);
    let page = PageRequest::new(query.page, query.size);

    let result = state.services.catalog.list_books(&filter, page).await?;
    Ok(Json(BookPage::from(result.map(BookDto::from))))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<BookDto>> {
    let Path(id) = path?;
    let book = load_book(&state, id).await?;
    Ok(Json(BookDto::from(book)))
}

/// Register a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book registered", body = BookDto),
        (status = 400, description = "Invalid input or ISBN already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> AppResult<(StatusCode, Json<BookDto>)> {
    let Json(request) = payload?;
    request.validate()?;

    let created = state.services.catalog.register_book(request.into_book()).await?;
    Ok((StatusCode::CREATED, Json(BookDto::from(created))))
}

/// Update the title and author of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateBook>, JsonRejection>,
) -> AppResult<Json<BookDto>> {
    let Path(id) = path?;
    let Json(request) = payload?;
    request.validate()?;

    let current = load_book(&state, id).await?;
    let updated = state
        .services
        .catalog
        .update_book(&request.apply_to(current))
        .await?;
    Ok(Json(BookDto::from(updated)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    let book = load_book(&state, id).await?;
    state.services.catalog.remove_book(&book).await?;
    Ok(StatusCode::NO_CONTENT)
}
