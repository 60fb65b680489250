//! Pagination types

use serde::Serialize;
use utoipa::ToSchema;

use super::book::BookDto;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Zero-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// A size of zero falls back to the default, oversized requests are capped
    pub fn new(page: Option<u32>, size: Option<u32>) -> Self {
        let size = match size {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        };
        Self {
            page: page.unwrap_or(0),
            size,
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One window of results plus the total number of matches
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            request,
        }
    }

    pub fn total_pages(&self) -> u64 {
        match self.request.size {
            0 => 0,
            size => self.total_elements.div_ceil(u64::from(size)),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            request: self.request,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: u32,
    pub page_size: u32,
    pub offset: u64,
}

/// Paged book list response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub content: Vec<BookDto>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub pageable: Pageable,
}

impl From<Page<BookDto>> for BookPage {
    fn from(page: Page<BookDto>) -> Self {
        let total_pages = page.total_pages();
        Self {
            pageable: Pageable {
                page_number: page.request.page,
                page_size: page.request.size,
                offset: page.request.offset(),
            },
            content: page.content,
            total_elements: page.total_elements,
            total_pages,
        }
    }
}
