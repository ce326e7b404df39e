//! In-memory implementation of the store interface.

use async_trait::async_trait;

use super::{CategoryMatch, NewsStore, StoreError};
use crate::fallback::fallback_news;
use crate::models::NewsItem;

/// Store over a fixed in-memory collection. Backs the degraded read path
/// (seeded with the embedded dataset) and doubles as the fake store in
/// handler tests.
#[derive(Debug, Clone)]
pub struct MemoryNewsStore {
    items: Vec<NewsItem>,
}

impl MemoryNewsStore {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self { items }
    }

    /// Seeded with the embedded fallback dataset.
    pub fn with_fallback_data() -> Self {
        Self::new(fallback_news().to_vec())
    }

    /// All items, most recent first (tie-break: id descending).
    pub fn sorted_by_date(&self) -> Vec<NewsItem> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        items
    }

    pub fn latest(&self, limit: usize, offset: usize) -> Vec<NewsItem> {
        self.sorted_by_date()
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect()
    }

    pub fn featured(&self) -> Option<NewsItem> {
        self.sorted_by_date().into_iter().find(|i| i.is_featured)
    }

    pub fn popular(&self, limit: usize) -> Vec<NewsItem> {
        self.sorted_by_date()
            .into_iter()
            .filter(|i| i.is_popular)
            .take(limit)
            .collect()
    }

    pub fn by_view_count(&self, limit: usize) -> Vec<NewsItem> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| {
            b.view_count
                .cmp(&a.view_count)
                .then_with(|| b.id.cmp(&a.id))
        });
        items.truncate(limit);
        items
    }

    pub fn related(&self, excluded_id: i64, limit: usize) -> Vec<NewsItem> {
        self.sorted_by_date()
            .into_iter()
            .filter(|i| i.id != excluded_id)
            .take(limit)
            .collect()
    }

    pub fn by_category(&self, category: &str, matcher: CategoryMatch) -> Vec<NewsItem> {
        let folded = category.to_lowercase();
        self.sorted_by_date()
            .into_iter()
            .filter(|i| match matcher {
                CategoryMatch::Exact => i.category == category,
                CategoryMatch::Fold => i.category.to_lowercase() == folded,
            })
            .collect()
    }

    pub fn by_id(&self, id: i64) -> Option<NewsItem> {
        self.items.iter().find(|i| i.id == id).cloned()
    }

    pub fn categories(&self) -> Vec<String> {
        self.sorted_by_date()
            .into_iter()
            .map(|i| i.category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl NewsStore for MemoryNewsStore {
    async fn fetch_latest(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self.latest(limit, offset))
    }

    async fn fetch_featured(&self) -> Result<Option<NewsItem>, StoreError> {
        Ok(self.featured())
    }

    async fn fetch_popular(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self.popular(limit))
    }

    async fn fetch_by_view_count(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self.by_view_count(limit))
    }

    async fn fetch_related(
        &self,
        excluded_id: i64,
        limit: usize,
    ) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self.related(excluded_id, limit))
    }

    async fn fetch_by_category(
        &self,
        category: &str,
        matcher: CategoryMatch,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self
            .by_category(category, matcher)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count_by_category(
        &self,
        category: &str,
        matcher: CategoryMatch,
    ) -> Result<usize, StoreError> {
        Ok(self.by_category(category, matcher).len())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<NewsItem>, StoreError> {
        Ok(self.by_id(id))
    }

    async fn fetch_slug_window(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self.latest(limit, 0))
    }

    async fn fetch_categories(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        Ok(self.categories().into_iter().take(limit).collect())
    }

    async fn count_all(&self) -> Result<usize, StoreError> {
        Ok(self.len())
    }
}
