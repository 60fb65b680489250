//! Catalog management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, Page, PageRequest},
    repository::{BookStore, DUPLICATE_ISBN_MESSAGE},
};

#[derive(Clone)]
pub struct CatalogService {
    books: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Register a new book.
    ///
    /// The existence check and the insert are separate round trips; two
    /// concurrent registrations of one isbn are settled by the store's unique
    /// constraint, which reports the same `DuplicateKey` error.
    pub async fn register_book(&self, book: Book) -> AppResult<Book> {
        if self.books.exists_by_isbn(&book.isbn).await? {
            return Err(AppError::DuplicateKey(DUPLICATE_ISBN_MESSAGE.to_string()));
        }

        let created = self.books.create(&book).await?;
        tracing::info!(
            "Catalog: registered book id={:?} isbn={}",
            created.id,
            created.isbn
        );
        Ok(created)
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Option<Book>> {
        self.books.fetch_by_id(id).await
    }

    /// Delete a persisted book. No existence re-check is made.
    pub async fn remove_book(&self, book: &Book) -> AppResult<()> {
        let id = book.require_id()?;
        self.books.delete(book).await?;
        tracing::info!("Catalog: removed book id={}", id);
        Ok(())
    }

    /// Store the full attribute set of a persisted book.
    /// Callers merge the fields they intend to change beforehand.
    pub async fn update_book(&self, book: &Book) -> AppResult<Book> {
        let id = book.require_id()?;
        let updated = self.books.update(book).await?;
        tracing::info!("Catalog: updated book id={}", id);
        Ok(updated)
    }

    pub async fn list_books(&self, filter: &BookFilter, page: PageRequest) -> AppResult<Page<Book>> {
        self.books.filtered_list(filter, page).await
    }

    pub async fn find_book_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        self.books.fetch_by_isbn(isbn).await
    }
}
