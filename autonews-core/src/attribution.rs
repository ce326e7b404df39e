//! Splitting trailing "Source: <url>" annotations out of summary text.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// The label is matched in English and in its Cyrillic form ("джерело"),
// case-insensitively, but only as a trailing block.
static TRAILING_SOURCE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\n{1,2}|\s+)(?:source|джерело)\s*:\s*(https?://\S+)\s*$").unwrap()
});
static TRAILING_URL_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[)\],.;!?]+$").unwrap());

/// Result of [`split_summary_and_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub summary: String,
    pub source_attribution_url: Option<String>,
}

/// Trim trailing punctuation and accept only well-formed http(s) URLs.
fn normalize_http_url(raw: &str) -> Option<String> {
    let trimmed = TRAILING_URL_PUNCTUATION.replace(raw.trim(), "");
    if trimmed.is_empty() {
        return None;
    }

    let parsed = Url::parse(&trimmed).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }
    Some(parsed.to_string())
}

/// Strip every trailing "Source: <url>" block from `summary`, keeping the
/// URL of the first block stripped. Non-trailing occurrences of the label
/// stay untouched. When no block matched, `fallback_url` (a separate store
/// column) is normalized and used instead.
pub fn split_summary_and_source(summary: &str, fallback_url: Option<&str>) -> SplitSummary {
    let mut remaining = summary.trim().to_string();
    let mut extracted: Option<String> = None;

    while !remaining.is_empty() {
        let Some(caps) = TRAILING_SOURCE_BLOCK.captures(&remaining) else {
            break;
        };

        if extracted.is_none() {
            extracted = caps.get(1).and_then(|url| normalize_http_url(url.as_str()));
        }

        let block_start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        remaining.truncate(block_start);
        let kept = remaining.trim_end().len();
        remaining.truncate(kept);
    }

    SplitSummary {
        summary: remaining.trim().to_string(),
        source_attribution_url: extracted
            .or_else(|| fallback_url.and_then(normalize_http_url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_block_with_punctuation() {
        let split = split_summary_and_source("Body text. Source: https://x.com/a)", None);
        assert_eq!(split.summary, "Body text.");
        assert_eq!(split.source_attribution_url.as_deref(), Some("https://x.com/a"));
    }

    #[test]
    fn test_localized_label() {
        let split = split_summary_and_source(
            "Короткий опис.\n\nДжерело: https://example.com/ua/123",
            None,
        );
        assert_eq!(split.summary, "Короткий опис.");
        assert_eq!(
            split.source_attribution_url.as_deref(),
            Some("https://example.com/ua/123")
        );
    }

    #[test]
    fn test_repeated_trailing_blocks() {
        let split = split_summary_and_source(
            "Body.\nSource: https://a.example/1\nSource: https://b.example/2",
            None,
        );
        assert_eq!(split.summary, "Body.");
        // The first block stripped (the outermost trailing one) wins.
        assert_eq!(
            split.source_attribution_url.as_deref(),
            Some("https://b.example/2")
        );
    }

    #[test]
    fn test_non_trailing_label_untouched() {
        let text = "Source: https://a.example/1 was cited in the report.";
        let split = split_summary_and_source(text, None);
        assert_eq!(split.summary, text);
        assert_eq!(split.source_attribution_url, None);
    }

    #[test]
    fn test_fallback_url_used_when_no_block() {
        let split = split_summary_and_source("Plain body.", Some("https://fallback.example/x,"));
        assert_eq!(split.summary, "Plain body.");
        assert_eq!(
            split.source_attribution_url.as_deref(),
            Some("https://fallback.example/x")
        );
    }

    #[test]
    fn test_embedded_block_beats_fallback() {
        let split = split_summary_and_source(
            "Body. Source: https://embedded.example/a",
            Some("https://fallback.example/b"),
        );
        assert_eq!(
            split.source_attribution_url.as_deref(),
            Some("https://embedded.example/a")
        );
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        let split = split_summary_and_source("Body. Source: https://ok.example/a", Some("ftp://nope.example"));
        assert_eq!(split.source_attribution_url.as_deref(), Some("https://ok.example/a"));

        let split = split_summary_and_source("Plain.", Some("javascript:alert(1)"));
        assert_eq!(split.source_attribution_url, None);
    }
}
