//! News content models and store-row mapping.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribution::split_summary_and_source;
use crate::format::format_view_count;

/// Shown when a row carries no usable image reference.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1493238792000-8113da705763?auto=format&fit=crop&w=1400&q=80";

/// Category assigned to rows without one, and to the synthetic category of
/// the degraded category-count path.
pub const DEFAULT_NEWS_CATEGORY: &str = "General";

/// A single article, as served to the rendering layer. Read-only projection
/// of a store row (or a fallback entry); the core never writes rows back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub summary: String,
    pub source_attribution_url: Option<String>,
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    pub views_label: String,
    pub view_count: i64,
    pub category: String,
    pub is_featured: bool,
    pub is_popular: bool,
}

/// Article count per distinct category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Raw store row. Every column except `id` may be null; mapping fills in
/// display defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsRow {
    pub id: i64,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub summary: Option<String>,
    pub source_url: Option<String>,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub date: Option<String>,
    pub published_at: Option<String>,
    pub views: Option<String>,
    pub view_count: Option<i64>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub is_popular: Option<bool>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a store timestamp leniently: RFC 3339 first, then a bare datetime,
/// then a bare date at midnight.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

fn normalize_date(published_at: Option<&str>, date: Option<&str>) -> DateTime<Utc> {
    published_at
        .and_then(parse_timestamp)
        .or_else(|| date.and_then(parse_timestamp))
        .unwrap_or_else(Utc::now)
}

fn normalize_image(image_url: Option<String>, image: Option<String>) -> String {
    non_empty(image_url)
        .or_else(|| non_empty(image))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
}

/// Map a raw row into a display-ready [`NewsItem`].
pub fn map_news_row(row: NewsRow) -> NewsItem {
    let view_count = row.view_count.unwrap_or(0);
    let excerpt_raw = non_empty(row.excerpt);
    let excerpt = excerpt_raw
        .clone()
        .unwrap_or_else(|| "No excerpt available yet.".to_string());
    let raw_summary = non_empty(row.summary)
        .or(excerpt_raw)
        .unwrap_or_else(|| "No summary available.".to_string());
    let split = split_summary_and_source(&raw_summary, row.source_url.as_deref());

    NewsItem {
        id: row.id,
        title: non_empty(row.title).unwrap_or_else(|| "Untitled news".to_string()),
        excerpt,
        summary: split.summary,
        source_attribution_url: split.source_attribution_url,
        image_url: normalize_image(row.image_url, row.image),
        published_at: normalize_date(row.published_at.as_deref(), row.date.as_deref()),
        views_label: non_empty(row.views).unwrap_or_else(|| format_view_count(view_count)),
        view_count,
        category: non_empty(row.category).unwrap_or_else(|| DEFAULT_NEWS_CATEGORY.to_string()),
        is_featured: row.is_featured.unwrap_or(false),
        is_popular: row.is_popular.unwrap_or(false),
    }
}
