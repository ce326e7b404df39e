//! PostgREST-style remote store client.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, Url};

use super::{CategoryMatch, NewsStore, StoreError};
use crate::models::{map_news_row, NewsItem, NewsRow};

use async_trait::async_trait;
use serde::Deserialize;

const NEWS_TABLE: &str = "rest/v1/news_items";
const NEWS_SELECT: &str = "id,title,excerpt,summary,source_url,image,image_url,date,\
                           published_at,views,view_count,category,is_featured,is_popular";
const ORDER_LATEST: &str = "published_at.desc,id.desc";
const ORDER_VIEWS: &str = "view_count.desc,id.desc";

#[derive(Debug, Deserialize)]
struct CategoryRow {
    category: Option<String>,
}

/// Remote client speaking the PostgREST query dialect: column projection
/// via `select`, `eq`/`neq`/`ilike` column filters, `order`, `limit` and
/// `offset` ranging, and exact row counts via the `Prefer: count=exact`
/// request header echoed back in `Content-Range`.
#[derive(Debug, Clone)]
pub struct RestNewsStore {
    http: Client,
    endpoint: Url,
}

impl RestNewsStore {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, StoreError> {
        let base = Url::parse(base_url)
            .map_err(|err| StoreError::InvalidUrl(format!("{base_url}: {err}")))?;
        let endpoint = base
            .join(NEWS_TABLE)
            .map_err(|err| StoreError::InvalidUrl(format!("{base_url}: {err}")))?;

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(anon_key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {anon_key}")) {
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self { http, endpoint })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http.request(method, self.endpoint.clone())
    }

    fn ensure_success(response: &Response) -> Result<(), StoreError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Status(response.status().as_u16()))
        }
    }

    async fn select_rows(&self, query: &[(&str, String)]) -> Result<Vec<NewsRow>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", NEWS_SELECT)])
            .query(query)
            .send()
            .await?;
        Self::ensure_success(&response)?;

        let body = response.text().await?;
        let rows: Vec<NewsRow> = serde_json::from_str(&body)?;
        Ok(rows)
    }

    async fn select_items(&self, query: &[(&str, String)]) -> Result<Vec<NewsItem>, StoreError> {
        let rows = self.select_rows(query).await?;
        Ok(rows.into_iter().map(map_news_row).collect())
    }

    /// Exact row count for the given filters, read from the
    /// `Content-Range` response header of a HEAD request.
    async fn count_where(&self, filters: &[(&str, String)]) -> Result<usize, StoreError> {
        let response = self
            .request(Method::HEAD)
            .header("Prefer", "count=exact")
            .query(&[("select", "id")])
            .query(filters)
            .send()
            .await?;
        Self::ensure_success(&response)?;

        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or(StoreError::MissingCount)?;

        content_range
            .rsplit('/')
            .next()
            .and_then(|total| total.parse().ok())
            .ok_or(StoreError::MissingCount)
    }

    fn category_filter(category: &str, matcher: CategoryMatch) -> (&'static str, String) {
        match matcher {
            CategoryMatch::Exact => ("category", format!("eq.{category}")),
            CategoryMatch::Fold => ("category", format!("ilike.{category}")),
        }
    }
}

#[async_trait]
impl NewsStore for RestNewsStore {
    async fn fetch_latest(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<NewsItem>, StoreError> {
        self.select_items(&[
            ("order", ORDER_LATEST.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ])
        .await
    }

    async fn fetch_featured(&self) -> Result<Option<NewsItem>, StoreError> {
        let items = self
            .select_items(&[
                ("is_featured", "eq.true".to_string()),
                ("order", ORDER_LATEST.to_string()),
                ("limit", "1".to_string()),
            ])
            .await?;
        Ok(items.into_iter().next())
    }

    async fn fetch_popular(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        self.select_items(&[
            ("is_popular", "eq.true".to_string()),
            ("order", ORDER_LATEST.to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }

    async fn fetch_by_view_count(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        self.select_items(&[
            ("order", ORDER_VIEWS.to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }

    async fn fetch_related(
        &self,
        excluded_id: i64,
        limit: usize,
    ) -> Result<Vec<NewsItem>, StoreError> {
        self.select_items(&[
            ("id", format!("neq.{excluded_id}")),
            ("order", ORDER_LATEST.to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }

    async fn fetch_by_category(
        &self,
        category: &str,
        matcher: CategoryMatch,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<NewsItem>, StoreError> {
        let (column, filter) = Self::category_filter(category, matcher);
        self.select_items(&[
            (column, filter),
            ("order", ORDER_LATEST.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ])
        .await
    }

    async fn count_by_category(
        &self,
        category: &str,
        matcher: CategoryMatch,
    ) -> Result<usize, StoreError> {
        let (column, filter) = Self::category_filter(category, matcher);
        self.count_where(&[(column, filter)]).await
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<NewsItem>, StoreError> {
        let items = self
            .select_items(&[
                ("id", format!("eq.{id}")),
                ("limit", "1".to_string()),
            ])
            .await?;
        Ok(items.into_iter().next())
    }

    async fn fetch_slug_window(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        self.fetch_latest(limit, 0).await
    }

    async fn fetch_categories(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[
                ("select", "category".to_string()),
                ("order", ORDER_LATEST.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        Self::ensure_success(&response)?;

        let body = response.text().await?;
        let rows: Vec<CategoryRow> = serde_json::from_str(&body)?;
        Ok(rows.into_iter().filter_map(|row| row.category).collect())
    }

    async fn count_all(&self) -> Result<usize, StoreError> {
        self.count_where(&[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_base_url() {
        assert!(matches!(
            RestNewsStore::new("not a url", "key"),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_join() {
        let store = RestNewsStore::new("https://project.example.co/", "anon").unwrap();
        assert_eq!(
            store.endpoint.as_str(),
            "https://project.example.co/rest/v1/news_items"
        );
    }

    #[test]
    fn test_category_filters() {
        assert_eq!(
            RestNewsStore::category_filter("EV", CategoryMatch::Exact),
            ("category", "eq.EV".to_string())
        );
        assert_eq!(
            RestNewsStore::category_filter("ev", CategoryMatch::Fold),
            ("category", "ilike.ev".to_string())
        );
    }
}
