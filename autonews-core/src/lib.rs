//! # autonews-core
//!
//! Core library for the AutoNews site.
//!
//! This crate provides the article data model, the slug codec, the
//! summary/source-attribution splitter, pagination arithmetic, and the
//! fallback-composing query layer over the remote article store.

pub mod attribution;
pub mod config;
pub mod fallback;
pub mod format;
pub mod models;
pub mod pagination;
pub mod slug;
pub mod store;

pub use attribution::{split_summary_and_source, SplitSummary};
pub use config::Config;
pub use fallback::fallback_news;
pub use format::{format_published_date, format_view_count};
pub use models::{CategoryCount, NewsItem, DEFAULT_NEWS_CATEGORY, PLACEHOLDER_IMAGE_URL};
pub use pagination::NewsPage;
pub use slug::{category_slug, news_slug, slugify, SlugDialect};
pub use store::{MemoryNewsStore, NewsRepository, NewsStore, RestNewsStore, StoreError};
