//! Offset pagination math shared by the remote and fallback query paths.

use serde::Serialize;

use crate::models::NewsItem;

/// Hard cap on page size accepted from callers.
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of articles plus count-derived metadata.
///
/// Invariants: `total_pages == max(1, ceil(total_count / limit))`, `page` is
/// clamped to `[1, total_pages]`, and `items.len() <= limit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsPage {
    pub items: Vec<NewsItem>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub limit: usize,
}

impl NewsPage {
    /// Empty page for queries that matched nothing (e.g. unknown category).
    pub fn empty(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 1,
            page: 1,
            limit,
        }
    }
}

/// Requested page numbers below 1 are treated as page 1.
pub fn normalize_page(page: usize) -> usize {
    page.max(1)
}

/// Page sizes are clamped to `[1, MAX_PAGE_SIZE]`.
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_PAGE_SIZE)
}

pub fn total_pages(total_count: usize, limit: usize) -> usize {
    total_count.div_ceil(limit).max(1)
}

/// Clamp a requested page to the last available one.
pub fn clamp_page(page: usize, total_count: usize, limit: usize) -> usize {
    normalize_page(page).min(total_pages(total_count, limit))
}

pub fn page_offset(page: usize, limit: usize) -> usize {
    (normalize_page(page) - 1) * limit
}

/// Assemble a page from already-fetched items. `page` must be the clamped
/// page the items were fetched at.
pub fn assemble_page(
    items: Vec<NewsItem>,
    total_count: usize,
    page: usize,
    limit: usize,
) -> NewsPage {
    NewsPage {
        items,
        total_count,
        total_pages: total_pages(total_count, limit),
        page: clamp_page(page, total_count, limit),
        limit,
    }
}

/// Paginate an in-memory, already-sorted collection.
pub fn paginate_slice(items: &[NewsItem], page: usize, limit: usize) -> NewsPage {
    let limit = clamp_limit(limit);
    let total_count = items.len();
    let page = clamp_page(page, total_count, limit);
    let offset = page_offset(page, limit);
    let page_items = items
        .iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    assemble_page(page_items, total_count, page, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_news;

    #[test]
    fn test_total_pages_math() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(31, 10), 4);
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 1), 1);
    }

    #[test]
    fn test_page_clamping() {
        assert_eq!(clamp_page(5, 25, 10), 3);
        assert_eq!(clamp_page(0, 25, 10), 1);
        assert_eq!(clamp_page(2, 0, 10), 1);
    }

    #[test]
    fn test_limit_clamping() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(12), 12);
        assert_eq!(clamp_limit(500), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_paginate_slice() {
        let items = fallback_news().to_vec();
        let page = paginate_slice(&items, 2, 4);
        assert_eq!(page.total_count, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 4);

        let beyond = paginate_slice(&items, 99, 4);
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.items.len(), 2);
    }

    #[test]
    fn test_empty_collection_page() {
        let page = paginate_slice(&[], 1, 10);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
    }
}
