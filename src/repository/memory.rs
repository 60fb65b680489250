//! In-process stores, used when no database is configured and by the test suites

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, LoanStore, DUPLICATE_ISBN_MESSAGE};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, Loan, NewLoan, Page, PageRequest},
};

#[derive(Debug, Default)]
struct BookTable {
    rows: BTreeMap<i64, Book>,
    last_id: i64,
}

impl BookTable {
    /// Unique constraint on isbn, ignoring the row being written
    fn check_isbn(&self, isbn: &str, own_id: Option<i64>) -> AppResult<()> {
        let taken = self
            .rows
            .values()
            .any(|b| b.isbn == isbn && b.id != own_id);
        if taken {
            return Err(AppError::DuplicateKey(DUPLICATE_ISBN_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Books kept in an ordered map keyed by id
#[derive(Debug, Default)]
pub struct InMemoryBooksRepository {
    table: RwLock<BookTable>,
    loans: Arc<RwLock<LoanTable>>,
}

impl InMemoryBooksRepository {
    /// Books whose deletion cascades to the loans held by `loans`
    pub fn with_loans(loans: &InMemoryLoansRepository) -> Self {
        Self {
            table: RwLock::default(),
            loans: loans.table.clone(),
        }
    }
}

#[async_trait]
impl BookStore for InMemoryBooksRepository {
    async fn create(&self, book: &Book) -> AppResult<Book> {
        let mut table = self.table.write().await;
        table.check_isbn(&book.isbn, None)?;

        table.last_id += 1;
        let id = table.last_id;
        let created = Book {
            id: Some(id),
            ..book.clone()
        };
        table.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn fetch_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|b| b.isbn == isbn).cloned())
    }

    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.values().any(|b| b.isbn == isbn))
    }

    async fn delete(&self, book: &Book) -> AppResult<()> {
        let id = book.require_id()?;
        let mut table = self.table.write().await;
        if table.rows.remove(&id).is_some() {
            self.loans
                .write()
                .await
                .rows
                .retain(|_, loan| loan.book.id != Some(id));
        }
        Ok(())
    }

    async fn update(&self, book: &Book) -> AppResult<Book> {
        let id = book.require_id()?;
        let mut table = self.table.write().await;
        table.check_isbn(&book.isbn, Some(id))?;

        if id > table.last_id {
            table.last_id = id;
        }
        table.rows.insert(id, book.clone());
        Ok(book.clone())
    }

    async fn filtered_list(&self, filter: &BookFilter, page: PageRequest) -> AppResult<Page<Book>> {
        let table = self.table.read().await;
        let matching: Vec<&Book> = table.rows.values().filter(|b| filter.matches(b)).collect();

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let content = matching
            .iter()
            .skip(offset)
            .take(page.size as usize)
            .map(|b| (*b).clone())
            .collect();

        Ok(Page::new(content, matching.len() as u64, page))
    }
}

#[derive(Debug, Default)]
struct LoanTable {
    rows: BTreeMap<i64, Loan>,
    last_id: i64,
}

#[derive(Debug, Default)]
pub struct InMemoryLoansRepository {
    table: Arc<RwLock<LoanTable>>,
}

impl InMemoryLoansRepository {
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LoanStore for InMemoryLoansRepository {
    async fn create(&self, loan: &NewLoan) -> AppResult<Loan> {
        let book_id = loan.book.require_id()?;
        let mut table = self.table.write().await;

        table.last_id += 1;
        let created = Loan::from_new(table.last_id, loan.clone());
        tracing::debug!("Stored loan {} for book {}", created.id, book_id);
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }
}
