//! RSS, sitemap, and Google News sitemap builders.
//!
//! Feeds are assembled as plain strings; every interpolated value goes
//! through [`escape_xml`].

use autonews_core::models::{CategoryCount, NewsItem};
use autonews_core::slug::{category_slug, news_slug, SlugDialect};
use autonews_render::SiteMeta;
use chrono::{DateTime, Duration, Utc};

/// How many items the RSS feed carries.
pub const RSS_ITEM_LIMIT: usize = 100;

/// How many article rows the sitemaps enumerate.
pub const SITEMAP_ARTICLE_LIMIT: usize = 1000;

/// Publication window for the Google News sitemap.
const NEWS_SITEMAP_WINDOW_DAYS: i64 = 2;

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn article_url(origin: &str, dialect: SlugDialect, item: &NewsItem) -> String {
    format!("{origin}/news/{}", news_slug(dialect, item))
}

pub fn render_rss(site: &SiteMeta, items: &[NewsItem], dialect: SlugDialect) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\">\n<channel>\n");
    xml.push_str(&format!("  <title>{}</title>\n", escape_xml(&site.title)));
    xml.push_str(&format!("  <link>{}/</link>\n", site.origin));
    xml.push_str(&format!(
        "  <description>{}</description>\n",
        escape_xml(&site.description)
    ));
    xml.push_str(&format!(
        "  <language>{}</language>\n",
        escape_xml(&site.language)
    ));

    for item in items {
        let url = article_url(&site.origin, dialect, item);
        xml.push_str("  <item>\n");
        xml.push_str(&format!(
            "    <title>{}</title>\n",
            escape_xml(&item.title)
        ));
        xml.push_str(&format!("    <link>{}</link>\n", escape_xml(&url)));
        xml.push_str(&format!(
            "    <guid isPermaLink=\"true\">{}</guid>\n",
            escape_xml(&url)
        ));
        xml.push_str(&format!(
            "    <pubDate>{}</pubDate>\n",
            item.published_at.to_rfc2822()
        ));
        xml.push_str(&format!(
            "    <description>{}</description>\n",
            escape_xml(&item.excerpt)
        ));
        xml.push_str(&format!(
            "    <category>{}</category>\n",
            escape_xml(&item.category)
        ));
        xml.push_str("  </item>\n");
    }

    xml.push_str("</channel>\n</rss>\n");
    xml
}

/// Standard sitemap: static routes, paginated listing routes, article
/// routes, category routes.
pub fn render_sitemap(
    site: &SiteMeta,
    total_pages: usize,
    items: &[NewsItem],
    categories: &[CategoryCount],
    dialect: SlugDialect,
) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    let mut push_url = |loc: &str, lastmod: Option<DateTime<Utc>>| {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
        if let Some(stamp) = lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", stamp.to_rfc3339()));
        }
        xml.push_str("  </url>\n");
    };

    push_url(&format!("{}/", site.origin), None);
    push_url(&format!("{}/categories", site.origin), None);
    for page in 2..=total_pages {
        push_url(&format!("{}/news/page/{page}", site.origin), None);
    }
    for item in items {
        push_url(
            &article_url(&site.origin, dialect, item),
            Some(item.published_at),
        );
    }
    for entry in categories {
        push_url(
            &format!("{}/category/{}", site.origin, category_slug(&entry.category)),
            None,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Select the articles the Google News sitemap carries: everything
/// published within the window, or the whole recent set when the window
/// is empty, capped at [`SITEMAP_ARTICLE_LIMIT`].
pub fn news_sitemap_items(items: Vec<NewsItem>, now: DateTime<Utc>) -> Vec<NewsItem> {
    let cutoff = now - Duration::days(NEWS_SITEMAP_WINDOW_DAYS);
    let windowed: Vec<NewsItem> = items
        .iter()
        .filter(|item| item.published_at >= cutoff)
        .cloned()
        .collect();

    let mut selected = if windowed.is_empty() { items } else { windowed };
    selected.truncate(SITEMAP_ARTICLE_LIMIT);
    selected
}

pub fn render_news_sitemap(site: &SiteMeta, items: &[NewsItem], dialect: SlugDialect) -> String {
    // Google News wants the bare language code, not a BCP 47 tag.
    let language: String = site.language.chars().take_while(|c| c.is_alphabetic()).collect();

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:news=\"http://www.google.com/schemas/sitemap-news/0.9\">\n",
    );

    for item in items {
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&article_url(&site.origin, dialect, item))
        ));
        xml.push_str("    <news:news>\n");
        xml.push_str("      <news:publication>\n");
        xml.push_str(&format!(
            "        <news:name>{}</news:name>\n",
            escape_xml(&site.title)
        ));
        xml.push_str(&format!(
            "        <news:language>{}</news:language>\n",
            escape_xml(&language)
        ));
        xml.push_str("      </news:publication>\n");
        xml.push_str(&format!(
            "      <news:publication_date>{}</news:publication_date>\n",
            item.published_at.to_rfc3339()
        ));
        xml.push_str(&format!(
            "      <news:title>{}</news:title>\n",
            escape_xml(&item.title)
        ));
        xml.push_str("    </news:news>\n");
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(origin: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {origin}/sitemap.xml\n")
}
