//! Data models for Livraria

pub mod book;
pub mod loan;
pub mod page;

// Re-export commonly used types
pub use book::{Book, BookDto, BookFilter, BookQuery, CreateBook, UpdateBook};
pub use loan::{CreateLoan, Loan, NewLoan};
pub use page::{BookPage, Page, PageRequest};
