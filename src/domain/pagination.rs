// Pagination request and response envelope
use serde::Serialize;

/// 1-indexed page with a fixed page size, passed explicitly into every
/// list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub items_per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, items_per_page: u32) -> Self {
        Self {
            page: page.max(1),
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.items_per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.items_per_page)
    }
}

/// List response body.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub items_per_page: u32,
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_results: u64) -> Self {
        Self {
            content,
            page: request.page,
            items_per_page: request.items_per_page,
            total_results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            items_per_page: self.items_per_page,
            total_results: self.total_results,
        }
    }
}

/// Slice `items` down to the requested page. Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Vec<T> {
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    items
        .into_iter()
        .skip(offset)
        .take(request.items_per_page as usize)
        .collect()
}
