//! Display formatting for view counts and publish dates.

use chrono::{DateTime, Utc};

const COMPACT_SUFFIXES: [&str; 3] = ["K", "M", "B"];

/// Compact en-US view-count label: `950`, `9.4K`, `42K`, `1.2M`.
/// Non-positive counts collapse to `"0"`.
pub fn format_view_count(value: i64) -> String {
    if value <= 0 {
        return "0".to_string();
    }
    if value < 1_000 {
        return value.to_string();
    }

    let mut unit = 1_000i64;
    let mut suffix = 0;
    while suffix + 1 < COMPACT_SUFFIXES.len() && value >= unit * 1_000 {
        unit *= 1_000;
        suffix += 1;
    }

    let mut rounded = compact_scale(value, unit);
    // Rounding can carry into the next unit: 999,950 is "1M", not "1000K".
    if rounded >= 1_000.0 && suffix + 1 < COMPACT_SUFFIXES.len() {
        unit *= 1_000;
        suffix += 1;
        rounded = compact_scale(value, unit);
    }

    if (rounded - rounded.trunc()).abs() < f64::EPSILON {
        format!("{}{}", rounded.trunc() as i64, COMPACT_SUFFIXES[suffix])
    } else {
        format!("{:.1}{}", rounded, COMPACT_SUFFIXES[suffix])
    }
}

/// Scale down by `unit` keeping at most one fractional digit.
fn compact_scale(value: i64, unit: i64) -> f64 {
    let scaled = value as f64 / unit as f64;
    (scaled * 10.0).round() / 10.0
}

/// Long-form date for article pages, e.g. "August 25, 2026".
pub fn format_published_date(value: &DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// Short date for tight card layouts, e.g. "Aug 25".
pub fn format_published_date_compact(value: &DateTime<Utc>) -> String {
    value.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_view_count_compacting() {
        assert_eq!(format_view_count(0), "0");
        assert_eq!(format_view_count(-5), "0");
        assert_eq!(format_view_count(950), "950");
        assert_eq!(format_view_count(9_400), "9.4K");
        assert_eq!(format_view_count(42_000), "42K");
        assert_eq!(format_view_count(1_200_000), "1.2M");
        assert_eq!(format_view_count(2_000_000_000), "2B");
    }

    #[test]
    fn test_rounding_carries_into_next_unit() {
        assert_eq!(format_view_count(999_940), "999.9K");
        assert_eq!(format_view_count(999_950), "1M");
        assert_eq!(format_view_count(999_950_000), "1B");
    }

    #[test]
    fn test_date_formats() {
        let date = Utc.with_ymd_and_hms(2026, 8, 25, 10, 30, 0).unwrap();
        assert_eq!(format_published_date(&date), "August 25, 2026");
        assert_eq!(format_published_date_compact(&date), "Aug 25");
    }
}
