//! Read-only access to the article collection.
//!
//! One query interface ([`NewsStore`]) with two implementations: the
//! PostgREST-style remote client ([`RestNewsStore`]) and the in-memory
//! dataset ([`MemoryNewsStore`]). [`NewsRepository`] composes them so that
//! an unconfigured or failing remote degrades to the embedded data.

mod memory;
mod repository;
mod rest;

pub use memory::MemoryNewsStore;
pub use repository::{aggregate_category_counts, NewsRepository, SLUG_LOOKUP_LIMIT};
pub use rest::RestNewsStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::NewsItem;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned status {0}")]
    Status(u16),

    #[error("failed to decode store payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("store response carried no row count")]
    MissingCount,

    #[error("invalid store url: {0}")]
    InvalidUrl(String),
}

/// How a category filter compares against the stored label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMatch {
    /// Exact, case-sensitive equality.
    Exact,
    /// Case-insensitive equality.
    Fold,
}

/// Row-read interface over the article collection.
///
/// Every listing is ordered `published_at` descending with `id` descending
/// as the tie-break, unless stated otherwise.
#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn fetch_latest(&self, limit: usize, offset: usize)
        -> Result<Vec<NewsItem>, StoreError>;

    /// Most recent item flagged featured, if any.
    async fn fetch_featured(&self) -> Result<Option<NewsItem>, StoreError>;

    /// Items flagged popular. An empty result is not an error.
    async fn fetch_popular(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError>;

    /// Whole collection ordered by view count descending.
    async fn fetch_by_view_count(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError>;

    async fn fetch_related(
        &self,
        excluded_id: i64,
        limit: usize,
    ) -> Result<Vec<NewsItem>, StoreError>;

    async fn fetch_by_category(
        &self,
        category: &str,
        matcher: CategoryMatch,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<NewsItem>, StoreError>;

    async fn count_by_category(
        &self,
        category: &str,
        matcher: CategoryMatch,
    ) -> Result<usize, StoreError>;

    async fn fetch_by_id(&self, id: i64) -> Result<Option<NewsItem>, StoreError>;

    /// Bounded most-recent window used for transliterated-title slug
    /// lookups.
    async fn fetch_slug_window(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError>;

    /// Category labels of the most recent rows, for client-side
    /// aggregation. May contain duplicates and empty labels.
    async fn fetch_categories(&self, limit: usize) -> Result<Vec<String>, StoreError>;

    async fn count_all(&self) -> Result<usize, StoreError>;
}
