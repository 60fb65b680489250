//! Loan management service

use std::sync::Arc;

use super::catalog::CatalogService;
use crate::{
    error::{AppError, AppResult},
    models::{Loan, NewLoan},
    repository::LoanStore,
};

pub const BOOK_NOT_FOUND_FOR_ISBN: &str = "Book not found for passed isbn";

#[derive(Clone)]
pub struct LoansService {
    catalog: CatalogService,
    loans: Arc<dyn LoanStore>,
}

impl LoansService {
    pub fn new(catalog: CatalogService, loans: Arc<dyn LoanStore>) -> Self {
        Self { catalog, loans }
    }

    /// Lend the book identified by `isbn` to `customer`, dated today
    pub async fn create_loan(&self, customer: &str, isbn: &str) -> AppResult<Loan> {
        let book = self
            .catalog
            .find_book_by_isbn(isbn)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND_FOR_ISBN.to_string()))?;

        let loan = self.loans.create(&NewLoan::today(customer, book)).await?;
        tracing::info!(
            "Loans: created loan id={} for isbn={} customer={}",
            loan.id,
            isbn,
            loan.customer
        );
        Ok(loan)
    }
}
