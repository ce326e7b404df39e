//! Page and feed handlers.

use askama::Template;
use axum::{
    extract::{Path as AxumPath, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;

use autonews_core::format::format_published_date;
use autonews_core::models::NewsItem;
use autonews_core::pagination::total_pages;
use autonews_core::slug::{
    category_slug, news_slug, normalize_category_segment, parse_legacy_news_id, SlugDialect,
};
use autonews_render::{
    pagination_links, AboutTemplate, ArticleTemplate, CategoriesTemplate, CategoryEntry,
    CategoryTemplate, ContactTemplate, CopyrightTemplate, HomeTemplate, NewsCardEntry,
    NotFoundTemplate, PopularEntry,
};

use crate::feeds;
use crate::state::AppState;

/// Articles per listing page.
pub const NEWS_PAGE_SIZE: usize = 12;

/// Related stories shown under an article.
const RELATED_LIMIT: usize = 4;

fn render_with_status<T: Template>(template: T, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!("template rendering failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "rendering error").into_response()
        }
    }
}

fn render_page<T: Template>(template: T) -> Response {
    render_with_status(template, StatusCode::OK)
}

fn not_found_page(state: &AppState) -> Response {
    render_with_status(
        NotFoundTemplate {
            site: state.site_meta(),
        },
        StatusCode::NOT_FOUND,
    )
}

fn xml_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        body,
    )
        .into_response()
}

fn news_cards(items: &[NewsItem], dialect: SlugDialect) -> Vec<NewsCardEntry> {
    items
        .iter()
        .map(|item| NewsCardEntry::from_item(item, dialect))
        .collect()
}

fn popular_entries(items: &[NewsItem], dialect: SlugDialect) -> Vec<PopularEntry> {
    items
        .iter()
        .map(|item| PopularEntry::from_item(item, dialect))
        .collect()
}

/// Rendered not-found page, used as the router fallback.
pub async fn not_found(State(state): State<AppState>) -> Response {
    not_found_page(&state)
}

async fn home_listing(state: &AppState, requested: usize) -> Response {
    let dialect = state.repo.dialect();
    let (page, featured, popular, categories) = tokio::join!(
        state.repo.latest_news_page(requested, NEWS_PAGE_SIZE),
        async {
            // The featured card only tops the first page.
            if requested == 1 {
                state.repo.featured_news().await
            } else {
                None
            }
        },
        state.popular_news(),
        state.category_counts(),
    );
    if requested > page.total_pages {
        return not_found_page(state);
    }

    render_page(HomeTemplate {
        site: state.site_meta(),
        featured: featured.map(|item| NewsCardEntry::from_item(&item, dialect)),
        articles: news_cards(&page.items, dialect),
        popular: popular_entries(&popular, dialect),
        categories: categories.iter().map(CategoryEntry::from_count).collect(),
        pagination: pagination_links(page.page, page.total_pages, "/", "/news"),
        page: page.page,
        total_pages: page.total_pages,
    })
}

pub async fn home(State(state): State<AppState>) -> Response {
    home_listing(&state, 1).await
}

pub async fn news_page(State(state): State<AppState>, AxumPath(raw): AxumPath<String>) -> Response {
    let Ok(number) = raw.parse::<usize>() else {
        return not_found_page(&state);
    };
    if number == 0 {
        return not_found_page(&state);
    }
    // Page one lives at the site root; keep one canonical address.
    if number == 1 {
        return Redirect::permanent("/").into_response();
    }
    home_listing(&state, number).await
}

pub async fn article(State(state): State<AppState>, AxumPath(slug): AxumPath<String>) -> Response {
    let dialect = state.repo.dialect();

    let item = match state.repo.news_by_slug(&slug).await {
        Some(item) => item,
        None => {
            // Legacy title+id links resolve through the embedded id.
            let Some(id) = parse_legacy_news_id(&slug) else {
                return not_found_page(&state);
            };
            match state.repo.news_by_id(id).await {
                Some(item) => item,
                None => return not_found_page(&state),
            }
        }
    };

    let canonical = news_slug(dialect, &item);
    if canonical != slug {
        return Redirect::permanent(&format!("/news/{canonical}")).into_response();
    }

    let (related, popular) = tokio::join!(
        state.repo.related_news(item.id, RELATED_LIMIT),
        state.popular_news(),
    );
    let site = state.site_meta();
    let canonical_url = format!("{}/news/{canonical}", site.origin);

    render_page(ArticleTemplate {
        site,
        title: item.title.clone(),
        summary: item.summary.clone(),
        image_url: item.image_url.clone(),
        category: item.category.clone(),
        category_url: format!("/category/{}", category_slug(&item.category)),
        published: format_published_date(&item.published_at),
        views: item.views_label.clone(),
        source_url: item.source_attribution_url.clone(),
        canonical_url,
        related: news_cards(&related, dialect),
        popular: popular_entries(&popular, dialect),
    })
}

/// Root-level shim for malformed legacy links like `/-some-title--17`.
/// Anything else unmatched at the root renders the 404 page.
pub async fn legacy_or_not_found(
    State(state): State<AppState>,
    AxumPath(segment): AxumPath<String>,
) -> Response {
    if segment.starts_with('-') {
        if let Some(id) = parse_legacy_news_id(&segment) {
            if let Some(item) = state.repo.news_by_id(id).await {
                let canonical = news_slug(state.repo.dialect(), &item);
                return Redirect::permanent(&format!("/news/{canonical}")).into_response();
            }
        }
    }
    not_found_page(&state)
}

async fn category_listing(state: &AppState, segment: &str, requested: usize) -> Response {
    let target = normalize_category_segment(segment);
    let counts = state.category_counts().await;
    let Some(entry) = counts
        .iter()
        .find(|count| category_slug(&count.category) == target)
    else {
        return not_found_page(state);
    };

    let dialect = state.repo.dialect();
    let (page, popular) = tokio::join!(
        state
            .repo
            .news_by_category_page(&entry.category, requested, NEWS_PAGE_SIZE),
        state.popular_news(),
    );
    if requested > page.total_pages {
        return not_found_page(state);
    }

    let base = format!("/category/{}", category_slug(&entry.category));

    render_page(CategoryTemplate {
        site: state.site_meta(),
        category: entry.category.clone(),
        total_count: page.total_count,
        articles: news_cards(&page.items, dialect),
        popular: popular_entries(&popular, dialect),
        pagination: pagination_links(page.page, page.total_pages, &base, &base),
        page: page.page,
        total_pages: page.total_pages,
    })
}

pub async fn category(
    State(state): State<AppState>,
    AxumPath(segment): AxumPath<String>,
) -> Response {
    category_listing(&state, &segment, 1).await
}

pub async fn category_page(
    State(state): State<AppState>,
    AxumPath((segment, raw)): AxumPath<(String, String)>,
) -> Response {
    let Ok(number) = raw.parse::<usize>() else {
        return not_found_page(&state);
    };
    if number == 0 {
        return not_found_page(&state);
    }
    if number == 1 {
        let target = normalize_category_segment(&segment);
        return Redirect::permanent(&format!("/category/{target}")).into_response();
    }
    category_listing(&state, &segment, number).await
}

pub async fn about(State(state): State<AppState>) -> Response {
    render_page(AboutTemplate {
        site: state.site_meta(),
    })
}

pub async fn contact(State(state): State<AppState>) -> Response {
    render_page(ContactTemplate {
        site: state.site_meta(),
    })
}

pub async fn copyright(State(state): State<AppState>) -> Response {
    render_page(CopyrightTemplate {
        site: state.site_meta(),
    })
}

/// Web app manifest for installable/home-screen use.
pub async fn manifest(State(state): State<AppState>) -> Response {
    let body = serde_json::json!({
        "name": state.config.site.title,
        "short_name": state.config.site.title,
        "description": state.config.site.description,
        "start_url": "/",
        "scope": "/",
        "display": "standalone",
        "background_color": "#ffffff",
        "theme_color": "#b3261e",
        "lang": state.config.site.language,
    });
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        body.to_string(),
    )
        .into_response()
}

pub async fn categories_index(State(state): State<AppState>) -> Response {
    let counts = state.category_counts().await;
    render_page(CategoriesTemplate {
        site: state.site_meta(),
        categories: counts.iter().map(CategoryEntry::from_count).collect(),
    })
}

pub async fn rss(State(state): State<AppState>) -> Response {
    if !state.config.enable_rss {
        return not_found_page(&state);
    }
    let items = state.repo.news_window(feeds::RSS_ITEM_LIMIT).await;
    xml_response(feeds::render_rss(
        &state.site_meta(),
        &items,
        state.repo.dialect(),
    ))
}

pub async fn sitemap(State(state): State<AppState>) -> Response {
    if !state.config.enable_sitemap {
        return not_found_page(&state);
    }
    let (items, total_count, categories) = tokio::join!(
        state.repo.news_window(feeds::SITEMAP_ARTICLE_LIMIT),
        state.repo.news_total_count(),
        state.category_counts(),
    );
    xml_response(feeds::render_sitemap(
        &state.site_meta(),
        total_pages(total_count, NEWS_PAGE_SIZE),
        &items,
        &categories,
        state.repo.dialect(),
    ))
}

pub async fn news_sitemap(State(state): State<AppState>) -> Response {
    if !state.config.enable_sitemap {
        return not_found_page(&state);
    }
    let items = state.repo.news_window(feeds::SITEMAP_ARTICLE_LIMIT).await;
    let selected = feeds::news_sitemap_items(items, Utc::now());
    xml_response(feeds::render_news_sitemap(
        &state.site_meta(),
        &selected,
        state.repo.dialect(),
    ))
}

pub async fn robots(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        feeds::render_robots(&state.config.site_origin()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autonews_core::config::{Config, SiteConfig};
    use autonews_core::fallback::fallback_news;
    use autonews_core::store::NewsRepository;
    use axum::body::to_bytes;
    use axum::http::header::LOCATION;

    fn sample_config() -> Config {
        Config {
            site: SiteConfig {
                title: "AutoNews".to_string(),
                description: "Automotive news".to_string(),
                url: "https://autonews.example".to_string(),
                language: "en-US".to_string(),
            },
            server: Default::default(),
            store: None,
            analytics: None,
            slug_dialect: SlugDialect::TitleOnly,
            enable_rss: true,
            enable_sitemap: true,
        }
    }

    fn sample_state() -> AppState {
        AppState::with_repository(
            sample_config(),
            NewsRepository::new(None, SlugDialect::TitleOnly),
        )
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> String {
        response
            .headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn home_renders_fallback_articles() {
        let response = home(State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("AutoNews"));
        assert!(body.contains(&fallback_news()[0].title));
        assert!(body.contains("/category/performance"));
    }

    #[tokio::test]
    async fn listing_page_one_redirects_to_root() {
        let response = news_page(State(sample_state()), AxumPath("1".to_string())).await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn listing_rejects_bad_page_numbers() {
        for raw in ["abc", "0", "-3", "99"] {
            let response = news_page(State(sample_state()), AxumPath(raw.to_string())).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "page {raw}");
        }
    }

    #[tokio::test]
    async fn article_serves_canonical_slug() {
        let item = &fallback_news()[0];
        let slug = news_slug(SlugDialect::TitleOnly, item);

        let response = article(State(sample_state()), AxumPath(slug)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(&item.title));
        assert!(body.contains("rel=\"canonical\""));
    }

    #[tokio::test]
    async fn article_redirects_legacy_id_slug() {
        let item = &fallback_news()[2];
        let canonical = news_slug(SlugDialect::TitleOnly, item);
        let legacy = format!("old-title-{}", item.id);

        let response = article(State(sample_state()), AxumPath(legacy)).await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), format!("/news/{canonical}"));
    }

    #[tokio::test]
    async fn article_unknown_slug_renders_404() {
        let response = article(
            State(sample_state()),
            AxumPath("no-such-story".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_legacy_shim_redirects() {
        let item = &fallback_news()[1];
        let canonical = news_slug(SlugDialect::TitleOnly, item);
        let segment = format!("-stale-title--{}", item.id);

        let response = legacy_or_not_found(State(sample_state()), AxumPath(segment)).await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), format!("/news/{canonical}"));

        let response =
            legacy_or_not_found(State(sample_state()), AxumPath("plain-page".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn category_resolves_slugged_segment() {
        let response = category(State(sample_state()), AxumPath("performance".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Performance"));

        let response = category(State(sample_state()), AxumPath("unknown".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn category_page_one_redirects_to_category_root() {
        let response = category_page(
            State(sample_state()),
            AxumPath(("performance".to_string(), "1".to_string())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), "/category/performance");
    }

    #[tokio::test]
    async fn static_pages_render() {
        let response = about(State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("About the AutoNews newsroom"));

        let response = contact(State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("mailto:editor@autonews.example"));

        let response = copyright(State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Copyright"));
    }

    #[tokio::test]
    async fn manifest_serves_site_metadata() {
        let response = manifest(State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/manifest+json"
        );

        let body = body_string(response).await;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["name"], "AutoNews");
        assert_eq!(value["start_url"], "/");
        assert_eq!(value["display"], "standalone");
    }

    #[tokio::test]
    async fn rss_serves_xml_and_honors_toggle() {
        let response = rss(State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/xml; charset=utf-8"
        );
        let body = body_string(response).await;
        assert!(body.contains("<rss version=\"2.0\">"));

        let mut config = sample_config();
        config.enable_rss = false;
        let state =
            AppState::with_repository(config, NewsRepository::new(None, SlugDialect::TitleOnly));
        let response = rss(State(state)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn sitemaps_enumerate_fallback_articles() {
        let response = sitemap(State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<urlset"));
        assert!(body.contains("/categories</loc>"));

        let response = news_sitemap(State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("xmlns:news"));
    }

    #[tokio::test]
    async fn robots_points_at_sitemap() {
        let response = robots(State(sample_state())).await;
        let body = body_string(response).await;
        assert!(body.contains("Sitemap: https://autonews.example/sitemap.xml"));
    }
}
