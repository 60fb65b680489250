//! Book entity, its wire representations and the catalog filter

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book as held by the catalog store.
///
/// `id` is `None` until the book has been registered.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Identity of a persisted book
    pub fn require_id(&self) -> AppResult<i64> {
        self.id
            .ok_or_else(|| AppError::InvalidArgument("Book id cant be null!".to_string()))
    }
}

/// Book as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
        }
    }
}

/// Register book request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title must not be empty")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "author is required"),
        length(min = 1, message = "author must not be empty")
    )]
    pub author: Option<String>,
    #[validate(
        required(message = "isbn is required"),
        length(min = 1, message = "isbn must not be empty")
    )]
    pub isbn: Option<String>,
}

impl CreateBook {
    /// Transient book built from a request that passed validation
    pub fn into_book(self) -> Book {
        Book::new(
            self.title.unwrap_or_default(),
            self.author.unwrap_or_default(),
            self.isbn.unwrap_or_default(),
        )
    }
}

/// Update book request. Any `id` or `isbn` in the body is ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
}

impl UpdateBook {
    /// Replace the mutable fields of `current`, keeping its id and isbn
    pub fn apply_to(self, current: Book) -> Book {
        Book {
            title: self.title,
            author: self.author,
            ..current
        }
    }
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    /// Zero-based page index
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Catalog filter: every set field must be a case-insensitive substring of
/// the matching book attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
}

/// Blank values leave the field unset; anything else is matched as given
fn criterion(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl BookFilter {
    pub fn new(title: Option<String>, author: Option<String>, isbn: Option<String>) -> Self {
        Self {
            title: criterion(title),
            author: criterion(author),
            isbn: criterion(isbn),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = criterion(Some(title.into()));
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = criterion(Some(author.into()));
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = criterion(Some(isbn.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }

    /// Set criteria as `(column, value)` pairs
    pub fn criteria(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", self.title.as_deref()),
            ("author", self.author.as_deref()),
            ("isbn", self.isbn.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.criteria().into_iter().all(|(column, value)| {
            let attribute = match column {
                "title" => &book.title,
                "author" => &book.author,
                _ => &book.isbn,
            };
            attribute.to_lowercase().contains(&value.to_lowercase())
        })
    }
}

impl From<&BookQuery> for BookFilter {
    fn from(query: &BookQuery) -> Self {
        BookFilter::new(query.title.clone(), query.author.clone(), query.isbn.clone())
    }
}
