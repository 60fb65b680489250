//! Loan model and related types

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// Loan that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub customer: String,
    pub book: Book,
    pub loan_date: NaiveDate,
    pub returned: bool,
}

impl NewLoan {
    /// Loan of `book` to `customer`, dated today
    pub fn today(customer: impl Into<String>, book: Book) -> Self {
        Self {
            customer: customer.into(),
            book,
            loan_date: Utc::now().date_naive(),
            returned: false,
        }
    }
}

/// Persisted loan. The book is referenced, not owned.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: i64,
    pub customer: String,
    pub book: Book,
    pub loan_date: NaiveDate,
    pub returned: bool,
}

impl Loan {
    pub fn from_new(id: i64, loan: NewLoan) -> Self {
        Self {
            id,
            customer: loan.customer,
            book: loan.book,
            loan_date: loan.loan_date,
            returned: loan.returned,
        }
    }
}

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    /// ISBN of the book being borrowed
    #[serde(default)]
    pub isbn: String,
    #[validate(length(min = 1, message = "customer must not be empty"))]
    pub customer: String,
}
