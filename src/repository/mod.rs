//! Repository layer: catalog and loan persistence

pub mod books;
pub mod loans;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, Loan, NewLoan, Page, PageRequest},
};

/// Message carried by every isbn uniqueness failure
pub const DUPLICATE_ISBN_MESSAGE: &str = "ISBN already registered.";

/// Persistent collection of books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a transient book and return it with its new id
    async fn create(&self, book: &Book) -> AppResult<Book>;

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    async fn fetch_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool>;

    /// Remove the record with `book.id` together with its loans; absent records are ignored
    async fn delete(&self, book: &Book) -> AppResult<()>;

    /// Overwrite every attribute of the record with `book.id`, inserting it if missing
    async fn update(&self, book: &Book) -> AppResult<Book>;

    /// Books matching `filter`, ordered by id, windowed by `page`
    async fn filtered_list(&self, filter: &BookFilter, page: PageRequest) -> AppResult<Page<Book>>;
}

/// Persistent collection of loans
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn create(&self, loan: &NewLoan) -> AppResult<Loan>;
}

/// Store handles shared by the services
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub loans: Arc<dyn LoanStore>,
}

impl Repository {
    /// Create a Postgres-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::PgBooksRepository::new(pool.clone())),
            loans: Arc::new(loans::PgLoansRepository::new(pool)),
        }
    }

    /// Create a repository that keeps everything in process memory
    pub fn in_memory() -> Self {
        let loans = memory::InMemoryLoansRepository::default();
        Self {
            books: Arc::new(memory::InMemoryBooksRepository::with_loans(&loans)),
            loans: Arc::new(loans),
        }
    }
}

/// Name of the unique constraint declared on `books.isbn`
const ISBN_CONSTRAINT: &str = "books_isbn_unique";

/// Map a write failure, turning isbn unique violations into `DuplicateKey`
pub(crate) fn write_error(err: sqlx::Error) -> AppError {
    let isbn_violation = err.as_database_error().is_some_and(|db| {
        db.code().is_some_and(|code| code == "23505") && db.constraint() == Some(ISBN_CONSTRAINT)
    });
    if isbn_violation {
        AppError::DuplicateKey(DUPLICATE_ISBN_MESSAGE.to_string())
    } else {
        AppError::Storage(err)
    }
}
