//! Loans repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::LoanStore;
use crate::{
    error::AppResult,
    models::{Loan, NewLoan},
};

#[derive(Clone)]
pub struct PgLoansRepository {
    pool: Pool<Postgres>,
}

impl PgLoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStore for PgLoansRepository {
    /// Create a new loan
    async fn create(&self, loan: &NewLoan) -> AppResult<Loan> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO loans (customer, book_id, loan_date, returned)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&loan.customer)
        .bind(loan.book.require_id()?)
        .bind(loan.loan_date)
        .bind(loan.returned)
        .fetch_one(&self.pool)
        .await?;

        Ok(Loan::from_new(id, loan.clone()))
    }
}
