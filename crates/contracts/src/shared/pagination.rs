use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page parameters as they arrive from a query string or request body.
/// Accepts both the `page`/`page_size` and the legacy `pagenumber`/`pagesize`
/// spellings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default, alias = "pagenumber", alias = "page_number")]
    pub page: Option<u64>,
    #[serde(default, alias = "pagesize")]
    pub page_size: Option<u64>,
}

impl PageRequest {
    pub fn new(page: Option<u64>, page_size: Option<u64>) -> Self {
        Self { page, page_size }
    }

    /// Normalized page window: page starts at 1, size is clamped to
    /// `1..=max_page_size`.
    pub fn resolve(&self, default_page_size: u64, max_page_size: u64) -> PageWindow {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(default_page_size)
            .clamp(1, max_page_size.max(1));
        PageWindow { page, page_size }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub page_size: u64,
}

impl PageWindow {
    /// Rows to skip; saturates at `i64::MAX` so huge page numbers yield an empty page
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }
}

/// One page of a listing together with the total row count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(window: PageWindow, count: u64, results: Vec<T>) -> Self {
        Self {
            count,
            page: window.page,
            page_size: window.page_size,
            results,
        }
    }
}
