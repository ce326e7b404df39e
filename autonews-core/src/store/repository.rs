//! Fallback-composing read API over the article collection.

use std::collections::HashMap;
use std::sync::Arc;

use super::{CategoryMatch, MemoryNewsStore, NewsStore, RestNewsStore, StoreError};
use crate::config::Config;
use crate::models::{CategoryCount, NewsItem, DEFAULT_NEWS_CATEGORY};
use crate::pagination::{
    assemble_page, clamp_limit, clamp_page, normalize_page, page_offset, paginate_slice, NewsPage,
};
use crate::slug::{parse_legacy_news_id, slugify, SlugDialect};

/// How many most-recent rows the transliterated-title slug lookup scans.
pub const SLUG_LOOKUP_LIMIT: usize = 2000;

/// Bounded scan size for client-side category aggregation.
const CATEGORY_SCAN_LIMIT: usize = 2000;

/// Read operations composed from an optional remote store and the embedded
/// dataset.
///
/// A missing remote (unconfigured credentials) and a failing remote are
/// handled identically: the operation serves the fallback data. No method
/// returns an error; absence is `None` or an empty collection.
pub struct NewsRepository {
    remote: Option<Arc<dyn NewsStore>>,
    fallback: MemoryNewsStore,
    dialect: SlugDialect,
}

impl NewsRepository {
    pub fn new(remote: Option<Arc<dyn NewsStore>>, dialect: SlugDialect) -> Self {
        Self {
            remote,
            fallback: MemoryNewsStore::with_fallback_data(),
            dialect,
        }
    }

    /// Build the repository from configuration, constructing the remote
    /// client when store credentials are present. A client that cannot be
    /// constructed degrades to fallback-only mode instead of failing.
    pub fn from_config(config: &Config) -> Self {
        let remote = config.store.as_ref().and_then(|store| {
            match RestNewsStore::new(&store.url, &store.anon_key) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn NewsStore>),
                Err(err) => {
                    tracing::warn!("store client unavailable, serving fallback data: {err}");
                    None
                }
            }
        });

        Self::new(remote, config.slug_dialect)
    }

    pub fn dialect(&self) -> SlugDialect {
        self.dialect
    }

    /// Most recent articles, newest first.
    pub async fn latest_news(&self, limit: usize) -> Vec<NewsItem> {
        let limit = clamp_limit(limit);
        if let Some(store) = &self.remote {
            match store.fetch_latest(limit, 0).await {
                Ok(items) => return items,
                Err(err) => tracing::warn!("latest news unavailable from store: {err}"),
            }
        }
        self.fallback.latest(limit, 0)
    }

    /// Bounded most-recent window for feed generation. The limit here is
    /// the caller's own cap and is not subject to page-size clamping.
    pub async fn news_window(&self, limit: usize) -> Vec<NewsItem> {
        if let Some(store) = &self.remote {
            match store.fetch_latest(limit, 0).await {
                Ok(items) => return items,
                Err(err) => tracing::warn!("news window unavailable from store: {err}"),
            }
        }
        self.fallback.latest(limit, 0)
    }

    /// One page of the latest-news listing with count-derived metadata.
    pub async fn latest_news_page(&self, page: usize, limit: usize) -> NewsPage {
        let limit = clamp_limit(limit);
        let page = normalize_page(page);

        if let Some(store) = &self.remote {
            match Self::remote_latest_page(store.as_ref(), page, limit).await {
                Ok(result) => return result,
                Err(err) => tracing::warn!("latest news page unavailable from store: {err}"),
            }
        }

        paginate_slice(&self.fallback.sorted_by_date(), page, limit)
    }

    async fn remote_latest_page(
        store: &dyn NewsStore,
        page: usize,
        limit: usize,
    ) -> Result<NewsPage, StoreError> {
        let total_count = store.count_all().await?;
        let page = clamp_page(page, total_count, limit);
        let items = store.fetch_latest(limit, page_offset(page, limit)).await?;
        Ok(assemble_page(items, total_count, page, limit))
    }

    /// The most recent featured article, or the most recent article
    /// overall when nothing is flagged.
    pub async fn featured_news(&self) -> Option<NewsItem> {
        if let Some(store) = &self.remote {
            match store.fetch_featured().await {
                Ok(Some(item)) => return Some(item),
                Ok(None) => {}
                Err(err) => tracing::warn!("featured news unavailable from store: {err}"),
            }
            return self.latest_news(1).await.into_iter().next();
        }

        let sorted = self.fallback.sorted_by_date();
        sorted
            .iter()
            .find(|item| item.is_featured)
            .or(sorted.first())
            .cloned()
    }

    /// Articles flagged popular, newest first. A store with no flagged
    /// rows (not an error) degrades to view-count ordering over the whole
    /// collection.
    pub async fn popular_news(&self, limit: usize) -> Vec<NewsItem> {
        let limit = clamp_limit(limit);

        if let Some(store) = &self.remote {
            match store.fetch_popular(limit).await {
                Ok(items) if !items.is_empty() => return items,
                Ok(_) => match store.fetch_by_view_count(limit).await {
                    Ok(items) => return items,
                    Err(err) => {
                        tracing::warn!("view-count ordering unavailable from store: {err}");
                        return self.fallback.by_view_count(limit);
                    }
                },
                Err(err) => tracing::warn!("popular news unavailable from store: {err}"),
            }
        }

        self.fallback.popular(limit)
    }

    /// Most recent articles excluding one id.
    pub async fn related_news(&self, excluded_id: i64, limit: usize) -> Vec<NewsItem> {
        let limit = clamp_limit(limit);
        if let Some(store) = &self.remote {
            match store.fetch_related(excluded_id, limit).await {
                Ok(items) => return items,
                Err(err) => tracing::warn!("related news unavailable from store: {err}"),
            }
        }
        self.fallback.related(excluded_id, limit)
    }

    /// One page of a category listing. The category is matched exactly
    /// first, then case-insensitively; a category matching nothing yields
    /// an empty page, never an error.
    pub async fn news_by_category_page(
        &self,
        category: &str,
        page: usize,
        limit: usize,
    ) -> NewsPage {
        let limit = clamp_limit(limit);
        let page = normalize_page(page);

        if let Some(store) = &self.remote {
            match Self::remote_category_page(store.as_ref(), category, page, limit).await {
                Ok(result) => return result,
                Err(err) => tracing::warn!("category page unavailable from store: {err}"),
            }
        }

        let matched = self.fallback.by_category(category, CategoryMatch::Fold);
        paginate_slice(&matched, page, limit)
    }

    async fn remote_category_page(
        store: &dyn NewsStore,
        category: &str,
        page: usize,
        limit: usize,
    ) -> Result<NewsPage, StoreError> {
        let mut matcher = CategoryMatch::Exact;
        let mut total_count = store.count_by_category(category, matcher).await?;
        if total_count == 0 {
            matcher = CategoryMatch::Fold;
            total_count = store.count_by_category(category, matcher).await?;
        }
        if total_count == 0 {
            return Ok(NewsPage::empty(limit));
        }

        let page = clamp_page(page, total_count, limit);
        let items = store
            .fetch_by_category(category, matcher, limit, page_offset(page, limit))
            .await?;
        Ok(assemble_page(items, total_count, page, limit))
    }

    /// Exact id lookup across store and fallback.
    pub async fn news_by_id(&self, id: i64) -> Option<NewsItem> {
        if let Some(store) = &self.remote {
            match store.fetch_by_id(id).await {
                Ok(Some(item)) => return Some(item),
                Ok(None) => {}
                Err(err) => tracing::warn!("id lookup unavailable from store: {err}"),
            }
        }
        self.fallback.by_id(id)
    }

    /// Resolve an article by slug under the configured dialect.
    ///
    /// The title-only dialect scans a bounded window of recent rows for a
    /// transliterated-title match; the title+id dialect resolves through
    /// the embedded id suffix.
    pub async fn news_by_slug(&self, slug: &str) -> Option<NewsItem> {
        match self.dialect {
            SlugDialect::TitleAndId => {
                let id = parse_legacy_news_id(slug)?;
                self.news_by_id(id).await
            }
            SlugDialect::TitleOnly => {
                let normalized = slugify(slug);

                if let Some(store) = &self.remote {
                    match store.fetch_slug_window(SLUG_LOOKUP_LIMIT).await {
                        Ok(items) => {
                            if let Some(item) = items
                                .into_iter()
                                .find(|item| slugify(&item.title) == normalized)
                            {
                                return Some(item);
                            }
                        }
                        Err(err) => tracing::warn!("slug lookup unavailable from store: {err}"),
                    }
                }

                self.fallback
                    .sorted_by_date()
                    .into_iter()
                    .find(|item| slugify(&item.title) == normalized)
            }
        }
    }

    /// Article counts per distinct category, count descending then name
    /// ascending. Never empty: the degraded path reports one default
    /// category covering the fallback set, and a genuinely empty
    /// collection reports that category with a zero count.
    pub async fn category_counts(&self) -> Vec<CategoryCount> {
        if let Some(store) = &self.remote {
            match store.fetch_categories(CATEGORY_SCAN_LIMIT).await {
                Ok(categories) if !categories.is_empty() => {
                    return aggregate_category_counts(categories);
                }
                Ok(_) => {
                    return vec![CategoryCount {
                        category: DEFAULT_NEWS_CATEGORY.to_string(),
                        count: 0,
                    }];
                }
                Err(err) => tracing::warn!("category counts unavailable from store: {err}"),
            }
        }

        aggregate_category_counts(self.fallback.categories())
    }

    /// Total article count, for pagination metadata computed apart from a
    /// page fetch.
    pub async fn news_total_count(&self) -> usize {
        if let Some(store) = &self.remote {
            match store.count_all().await {
                Ok(count) => return count,
                Err(err) => tracing::warn!("total count unavailable from store: {err}"),
            }
        }
        self.fallback.len()
    }
}

/// Aggregate raw category labels into per-category counts. Labels are
/// grouped case-insensitively after trimming (empty labels count toward
/// the default category); the first-seen spelling is kept for display.
pub fn aggregate_category_counts(categories: Vec<String>) -> Vec<CategoryCount> {
    let mut grouped: HashMap<String, CategoryCount> = HashMap::new();

    for raw in categories {
        let trimmed = raw.trim();
        let label = if trimmed.is_empty() {
            DEFAULT_NEWS_CATEGORY
        } else {
            trimmed
        };
        let key = label.to_lowercase();
        grouped
            .entry(key)
            .or_insert_with(|| CategoryCount {
                category: label.to_string(),
                count: 0,
            })
            .count += 1;
    }

    let mut counts: Vec<CategoryCount> = grouped.into_values().collect();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
    });
    counts
}
