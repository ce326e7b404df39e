//! Askama template definitions and their display models.

use askama::Template;

use autonews_core::format::{format_published_date, format_published_date_compact};
use autonews_core::models::{CategoryCount, NewsItem};
use autonews_core::slug::{category_slug, news_slug, SlugDialect};

/// Site-wide metadata shared by every page.
#[derive(Debug, Clone)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub origin: String,
    pub language: String,
    pub year: i32,
    /// GA measurement id; the analytics snippet renders only when set.
    pub ga_measurement_id: Option<String>,
}

/// An article card in a listing grid.
#[derive(Debug, Clone)]
pub struct NewsCardEntry {
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
    pub category: String,
    pub category_url: String,
    pub published: String,
    pub views: String,
}

impl NewsCardEntry {
    pub fn from_item(item: &NewsItem, dialect: SlugDialect) -> Self {
        Self {
            url: format!("/news/{}", news_slug(dialect, item)),
            title: item.title.clone(),
            excerpt: item.excerpt.clone(),
            image_url: item.image_url.clone(),
            category: item.category.clone(),
            category_url: format!("/category/{}", category_slug(&item.category)),
            published: format_published_date(&item.published_at),
            views: item.views_label.clone(),
        }
    }
}

/// A compact entry in the popular-news sidebar.
#[derive(Debug, Clone)]
pub struct PopularEntry {
    pub url: String,
    pub title: String,
    pub published: String,
    pub views: String,
}

impl PopularEntry {
    pub fn from_item(item: &NewsItem, dialect: SlugDialect) -> Self {
        Self {
            url: format!("/news/{}", news_slug(dialect, item)),
            title: item.title.clone(),
            published: format_published_date_compact(&item.published_at),
            views: item.views_label.clone(),
        }
    }
}

/// One category link with its article count.
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub name: String,
    pub url: String,
    pub count: usize,
}

impl CategoryEntry {
    pub fn from_count(count: &CategoryCount) -> Self {
        Self {
            name: count.category.clone(),
            url: format!("/category/{}", category_slug(&count.category)),
            count: count.count,
        }
    }
}

/// One slot in the pagination navigation. A gap slot renders as an
/// ellipsis with no link.
#[derive(Debug, Clone)]
pub struct PageLink {
    pub label: String,
    pub url: String,
    pub is_current: bool,
    pub is_gap: bool,
}

impl PageLink {
    fn page(number: usize, url: String, current: usize) -> Self {
        Self {
            label: number.to_string(),
            url,
            is_current: number == current,
            is_gap: false,
        }
    }

    fn gap() -> Self {
        Self {
            label: String::from("..."),
            url: String::new(),
            is_current: false,
            is_gap: true,
        }
    }
}

/// Build the windowed page navigation for a listing.
///
/// Seven or fewer pages render in full. Longer listings render the first
/// and last page plus a window around the current one, with ellipsis gaps
/// where pages are skipped. `first_url` is the canonical address of page 1
/// (the listing root); later pages append `/page/{n}` to `base_path`.
pub fn pagination_links(
    current: usize,
    total: usize,
    first_url: &str,
    base_path: &str,
) -> Vec<PageLink> {
    let url_for = |number: usize| {
        if number == 1 {
            first_url.to_string()
        } else {
            format!("{base_path}/page/{number}")
        }
    };

    if total <= 7 {
        return (1..=total.max(1))
            .map(|n| PageLink::page(n, url_for(n), current))
            .collect();
    }

    let window_start = current.saturating_sub(1).max(1);
    let window_end = (current + 1).min(total);

    let mut links = Vec::new();
    let mut last_emitted = 0;
    for number in 1..=total {
        let shown = number == 1 || number == total || (window_start..=window_end).contains(&number);
        if !shown {
            continue;
        }
        if number > last_emitted + 1 {
            links.push(PageLink::gap());
        }
        links.push(PageLink::page(number, url_for(number), current));
        last_emitted = number;
    }
    links
}

/// Home page: featured card, latest listing, sidebar.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub site: SiteMeta,
    pub featured: Option<NewsCardEntry>,
    pub articles: Vec<NewsCardEntry>,
    pub popular: Vec<PopularEntry>,
    pub categories: Vec<CategoryEntry>,
    pub pagination: Vec<PageLink>,
    pub page: usize,
    pub total_pages: usize,
}

/// Article detail page.
#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate {
    pub site: SiteMeta,
    pub title: String,
    pub summary: String,
    pub image_url: String,
    pub category: String,
    pub category_url: String,
    pub published: String,
    pub views: String,
    pub source_url: Option<String>,
    pub canonical_url: String,
    pub related: Vec<NewsCardEntry>,
    pub popular: Vec<PopularEntry>,
}

/// Category listing page.
#[derive(Template)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub site: SiteMeta,
    pub category: String,
    pub total_count: usize,
    pub articles: Vec<NewsCardEntry>,
    pub popular: Vec<PopularEntry>,
    pub pagination: Vec<PageLink>,
    pub page: usize,
    pub total_pages: usize,
}

/// Category index page.
#[derive(Template)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub site: SiteMeta,
    pub categories: Vec<CategoryEntry>,
}

/// Editorial "about" page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub site: SiteMeta,
}

/// Editorial contact page.
#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub site: SiteMeta,
}

/// Copyright policy page.
#[derive(Template)]
#[template(path = "copyright.html")]
pub struct CopyrightTemplate {
    pub site: SiteMeta,
}

/// 404 error page template
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub site: SiteMeta,
}
