//! Shared server state.

use std::sync::Arc;

use autonews_core::config::Config;
use autonews_core::models::{CategoryCount, NewsItem};
use autonews_core::store::NewsRepository;
use autonews_render::SiteMeta;
use chrono::{Datelike, Utc};

use crate::cache::{TimedCache, REVALIDATE_WINDOW};

/// How many popular items the sidebar cache holds.
pub const POPULAR_LIMIT: usize = 6;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repo: Arc<NewsRepository>,
    popular: Arc<TimedCache<Vec<NewsItem>>>,
    categories: Arc<TimedCache<Vec<CategoryCount>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let repo = NewsRepository::from_config(&config);
        Self::with_repository(config, repo)
    }

    pub fn with_repository(config: Config, repo: NewsRepository) -> Self {
        Self {
            config: Arc::new(config),
            repo: Arc::new(repo),
            popular: Arc::new(TimedCache::new(REVALIDATE_WINDOW)),
            categories: Arc::new(TimedCache::new(REVALIDATE_WINDOW)),
        }
    }

    /// Popular sidebar items, served through the timed cache.
    pub async fn popular_news(&self) -> Vec<NewsItem> {
        if let Some(items) = self.popular.get() {
            return items;
        }
        let items = self.repo.popular_news(POPULAR_LIMIT).await;
        self.popular.put(items.clone());
        items
    }

    /// Category counts, served through the timed cache.
    pub async fn category_counts(&self) -> Vec<CategoryCount> {
        if let Some(counts) = self.categories.get() {
            return counts;
        }
        let counts = self.repo.category_counts().await;
        self.categories.put(counts.clone());
        counts
    }

    pub fn site_meta(&self) -> SiteMeta {
        SiteMeta {
            title: self.config.site.title.clone(),
            description: self.config.site.description.clone(),
            origin: self.config.site_origin(),
            language: self.config.site.language.clone(),
            year: Utc::now().year(),
            ga_measurement_id: self.config.ga_measurement_id().map(str::to_string),
        }
    }
}
