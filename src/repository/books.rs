//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::{write_error, BookStore};
use crate::{
    error::AppResult,
    models::{Book, BookFilter, Page, PageRequest},
};

/// `ILIKE` pattern matching `value` anywhere, with LIKE metacharacters escaped
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &BookFilter) {
    let mut separator = " WHERE ";
    for (column, value) in filter.criteria() {
        builder
            .push(separator)
            .push(column)
            .push(" ILIKE ")
            .push_bind(contains_pattern(value));
        separator = " AND ";
    }
}

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBooksRepository {
    async fn create(&self, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, isbn
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT id, title, author, isbn FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn fetch_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT id, title, author, isbn FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete(&self, book: &Book) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(book.require_id()?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author, isbn)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title, author = EXCLUDED.author, isbn = EXCLUDED.isbn
            RETURNING id, title, author, isbn
            "#,
        )
        .bind(book.require_id()?)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)
    }

    async fn filtered_list(&self, filter: &BookFilter, page: PageRequest) -> AppResult<Page<Book>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT id, title, author, isbn FROM books");
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(i64::from(page.size))
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);
        let books = select.build_query_as::<Book>().fetch_all(&self.pool).await?;

        Ok(Page::new(books, total.max(0) as u64, page))
    }
}
