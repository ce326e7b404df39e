//! Slug generation, transliteration, and legacy-id recovery.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::NewsItem;

static NON_ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static ASCII_DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]+").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").unwrap());
static LEGACY_ID_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-(\d+)$").unwrap());

/// Which slug format article links are generated in.
///
/// `TitleOnly` is the canonical dialect; `TitleAndId` is the older format
/// that appends the numeric id for guaranteed uniqueness. Selected once at
/// composition time via configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlugDialect {
    #[default]
    TitleOnly,
    TitleAndId,
}

/// Latin replacement for a single Cyrillic letter (Ukrainian first, then the
/// Russian-only letters). Soft and hard signs drop out entirely.
fn latin_for(c: char) -> Option<&'static str> {
    let mapped = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "h",
        'ґ' => "g",
        'д' => "d",
        'е' => "e",
        'є' => "ye",
        'ж' => "zh",
        'з' => "z",
        'и' => "y",
        'і' => "i",
        'ї' => "yi",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ь' => "",
        'ъ' => "",
        'ы' => "y",
        'э' => "e",
        'ё' => "yo",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(mapped)
}

fn transliterate(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match latin_for(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// Convert a title to a URL-safe, transliterated slug.
///
/// Rules:
/// - Lowercase, then map Cyrillic letters to Latin sequences
/// - NFKD-normalize and strip combining diacritics
/// - Drop apostrophes and backticks, expand `&` to " and "
/// - Collapse every run of non `[a-z0-9]` characters into one hyphen
/// - Trim leading/trailing hyphens
///
/// A result with no alphanumeric characters falls back to `"news"`, so the
/// function never produces an empty path segment. Idempotent by construction.
pub fn slugify(value: &str) -> String {
    let transliterated = transliterate(&value.to_lowercase());
    let folded: String = transliterated
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let cleaned = folded
        .replace(['\'', '"', '`', '\u{2019}'], "")
        .replace('&', " and ");
    let collapsed = NON_ALNUM_RUN.replace_all(&cleaned, "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        "news".to_string()
    } else {
        trimmed.to_string()
    }
}

/// ASCII-only slugify used by the title+id dialect: keeps `[a-z0-9\s-]`,
/// collapses whitespace/hyphen runs into single hyphens.
fn slugify_ascii(value: &str) -> String {
    let lowered = value.to_lowercase();
    let kept = ASCII_DISALLOWED.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUN.replace_all(kept.trim(), "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        "news".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Canonical slug for an article under the given dialect.
pub fn news_slug(dialect: SlugDialect, item: &NewsItem) -> String {
    match dialect {
        SlugDialect::TitleOnly => slugify(&item.title),
        SlugDialect::TitleAndId => format!("{}-{}", slugify_ascii(&item.title), item.id),
    }
}

/// Extract the numeric id from a legacy `-{digits}` slug suffix.
///
/// Returns `None` when no trailing digit group exists or the digits do not
/// fit in an `i64`. Also resolves the title+id dialect, whose id suffix uses
/// the same shape.
pub fn parse_legacy_news_id(slug: &str) -> Option<i64> {
    LEGACY_ID_SUFFIX
        .captures(slug)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Slug for a category landing page.
pub fn category_slug(category: &str) -> String {
    slugify(category)
}

/// Normalize a raw category path segment (possibly percent-encoded) into a
/// category slug for comparison. Decode failures fall back to slugifying the
/// raw segment unchanged.
pub fn normalize_category_segment(segment: &str) -> String {
    match percent_decode(segment) {
        Some(decoded) => slugify(&decoded),
        None => slugify(segment),
    }
}

fn percent_decode(segment: &str) -> Option<String> {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes.get(i + 1..i + 3)?;
                let hex = std::str::from_utf8(hex).ok()?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_news;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Porsche 911 GT3 RS"), "porsche-911-gt3-rs");
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(slugify("Мій тест! Авто"), "miy-test-avto");
        assert_eq!(slugify("Щось їде"), "shchos-yide");
        assert_eq!(slugify("Ёлка в кузове"), "yolka-v-kuzove");
    }

    #[test]
    fn test_soft_and_hard_signs_drop() {
        assert_eq!(slugify("День"), "den");
        assert_eq!(slugify("объезд"), "obezd");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(slugify("Rimac & Bugatti"), "rimac-and-bugatti");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("Café racer"), "cafe-racer");
    }

    #[test]
    fn test_empty_falls_back_to_news() {
        assert_eq!(slugify(""), "news");
        assert_eq!(slugify("!!!"), "news");
        assert_eq!(slugify("   "), "news");
    }

    #[test]
    fn test_idempotent() {
        for title in ["Мій тест! Авто", "Rimac & Bugatti", "What's new?", ""] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_title_and_id_round_trip() {
        let mut item = fallback_news()[0].clone();
        item.id = 42;
        item.title = "Foo Bar".to_string();

        let slug = news_slug(SlugDialect::TitleAndId, &item);
        assert_eq!(slug, "foo-bar-42");
        assert_eq!(parse_legacy_news_id(&slug), Some(42));
    }

    #[test]
    fn test_legacy_id_parsing() {
        assert_eq!(parse_legacy_news_id("-title--17"), Some(17));
        assert_eq!(parse_legacy_news_id("old-post-3"), Some(3));
        assert_eq!(parse_legacy_news_id("no-digits-here"), None);
        assert_eq!(parse_legacy_news_id(""), None);
        assert_eq!(
            parse_legacy_news_id("overflow-999999999999999999999999"),
            None
        );
    }

    #[test]
    fn test_category_segment_normalization() {
        assert_eq!(normalize_category_segment("Performance"), "performance");
        assert_eq!(normalize_category_segment("Test%20Drives"), "test-drives");
        assert_eq!(normalize_category_segment("%D0%B0%D0%B2%D1%82%D0%BE"), "avto");
        // Malformed escapes slugify the raw segment instead of failing.
        assert_eq!(normalize_category_segment("bad%2"), "bad-2");
    }
}
