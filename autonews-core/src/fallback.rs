//! Embedded article dataset served when the remote store is unreachable.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;

use crate::models::NewsItem;

fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

struct Seed {
    id: i64,
    title: &'static str,
    excerpt: &'static str,
    summary: &'static str,
    image_url: &'static str,
    days_ago: i64,
    views_label: &'static str,
    view_count: i64,
    category: &'static str,
    is_featured: bool,
    is_popular: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        title: "Rimac Sets Fresh EV Lap Record at Nurburgring",
        excerpt: "Rimac's latest prototype cut more than three seconds from the previous electric production benchmark after a full-power run in changing track conditions.",
        summary: "Engineers credited new thermal software and revised aero channels for the jump in consistency during repeated high-speed laps.",
        image_url: "https://images.unsplash.com/photo-1611016186353-9af58c69a533?auto=format&fit=crop&w=1400&q=80",
        days_ago: 0,
        views_label: "42K",
        view_count: 42_000,
        category: "Performance",
        is_featured: true,
        is_popular: true,
    },
    Seed {
        id: 2,
        title: "Solid-State Battery Pilot Hits 80 Percent in 9 Minutes",
        excerpt: "A supplier consortium confirmed pilot-cell charging results that could meaningfully reduce charging anxiety for long-distance EV drivers.",
        summary: "The first partner vehicles using these packs are expected to begin road validation later this year in mixed climates.",
        image_url: "https://images.unsplash.com/photo-1593941707874-ef25b8b4a92b?auto=format&fit=crop&w=1400&q=80",
        days_ago: 0,
        views_label: "28K",
        view_count: 28_000,
        category: "EV",
        is_featured: false,
        is_popular: true,
    },
    Seed {
        id: 3,
        title: "Mercedes Reveals New Hyper-Screen Cockpit Stack",
        excerpt: "The new interior architecture adds an adaptive co-driver panel and a low-glare HUD layer designed for brighter daylight visibility.",
        summary: "The platform will roll out first in flagship sedans and then scale to premium crossovers by next model year.",
        image_url: "https://images.unsplash.com/photo-1492144534655-ae79c964c9d7?auto=format&fit=crop&w=1400&q=80",
        days_ago: 1,
        views_label: "19K",
        view_count: 19_000,
        category: "Technology",
        is_featured: false,
        is_popular: true,
    },
    Seed {
        id: 4,
        title: "Toyota Expands Hybrid Lineup with 1,000 km Combined Range",
        excerpt: "Toyota's new generation hybrid package improves urban efficiency while maintaining highway cruising range for long commutes.",
        summary: "The company says software-driven power blending lowered consumption in stop-and-go traffic by double digits.",
        image_url: "https://images.unsplash.com/photo-1503376780353-7e6692767b70?auto=format&fit=crop&w=1400&q=80",
        days_ago: 1,
        views_label: "16K",
        view_count: 16_000,
        category: "Industry",
        is_featured: false,
        is_popular: false,
    },
    Seed {
        id: 5,
        title: "Pirelli Releases New Winter Compound for Heavy EV SUVs",
        excerpt: "The tire maker introduced a reinforced winter sidewall and lower rolling-resistance tread compound tuned for battery-heavy crossovers.",
        summary: "Independent braking tests reported shorter wet-snow stopping distances compared with last season's benchmark model.",
        image_url: "https://images.unsplash.com/photo-1542362567-b07e54358753?auto=format&fit=crop&w=1400&q=80",
        days_ago: 2,
        views_label: "12K",
        view_count: 12_000,
        category: "Reviews",
        is_featured: false,
        is_popular: false,
    },
    Seed {
        id: 6,
        title: "Autonomous Freight Pilot Completes 5,000 km Safety Trial",
        excerpt: "An interstate commercial pilot with supervised autonomous driving completed overnight routes with no reported critical incidents.",
        summary: "Operators highlighted lower fatigue and smoother lane discipline, while regulators requested broader weather-condition data.",
        image_url: "https://images.unsplash.com/photo-1563720223185-11003d516935?auto=format&fit=crop&w=1400&q=80",
        days_ago: 2,
        views_label: "11K",
        view_count: 11_000,
        category: "Technology",
        is_featured: false,
        is_popular: false,
    },
    Seed {
        id: 7,
        title: "Volkswagen Cuts Assembly Energy Use by 18 Percent",
        excerpt: "Factory upgrades across two plants delivered lower power draw per vehicle using process heat recovery and smarter robotics scheduling.",
        summary: "The rollout is part of a broader program targeting lower manufacturing emissions without reducing output capacity.",
        image_url: "https://images.unsplash.com/photo-1647427060118-4911c9821b82?auto=format&fit=crop&w=1400&q=80",
        days_ago: 3,
        views_label: "9.4K",
        view_count: 9_400,
        category: "Industry",
        is_featured: false,
        is_popular: false,
    },
    Seed {
        id: 8,
        title: "Best Compact SUVs of 2026: Real-World Fuel Economy Test",
        excerpt: "Our 1,200 km comparison drive ranked the most efficient compact SUVs by mixed-cycle consumption, comfort, and cargo practicality.",
        summary: "Three hybrids topped the chart, while one turbo crossover delivered the strongest passing performance.",
        image_url: "https://images.unsplash.com/photo-1511919884226-fd3cad34687c?auto=format&fit=crop&w=1400&q=80",
        days_ago: 3,
        views_label: "21K",
        view_count: 21_000,
        category: "Reviews",
        is_featured: false,
        is_popular: true,
    },
    Seed {
        id: 9,
        title: "Ford Adds NACS Ports Across North American EV Range",
        excerpt: "Ford confirmed all new EV launches from next year will include NACS as standard, with adapter support continuing for existing owners.",
        summary: "Infrastructure teams expect fewer route-planning gaps for long trips as charging network interoperability improves.",
        image_url: "https://images.unsplash.com/photo-1553440569-bcc63803a83d?auto=format&fit=crop&w=1400&q=80",
        days_ago: 4,
        views_label: "14K",
        view_count: 14_000,
        category: "EV",
        is_featured: false,
        is_popular: false,
    },
    Seed {
        id: 10,
        title: "Porsche 911 GT3 RS Track Package Tested on US Circuits",
        excerpt: "A new cooling package and revised downforce profile helped the GT3 RS post repeatable lap improvements across two technical tracks.",
        summary: "Test drivers reported stronger confidence on corner exits and improved tire consistency over longer sessions.",
        image_url: "https://images.unsplash.com/photo-1614200179396-2bdb77ebf81b?auto=format&fit=crop&w=1400&q=80",
        days_ago: 4,
        views_label: "24K",
        view_count: 24_000,
        category: "Performance",
        is_featured: false,
        is_popular: true,
    },
];

static FALLBACK_NEWS: Lazy<Vec<NewsItem>> = Lazy::new(|| {
    SEEDS
        .iter()
        .map(|seed| NewsItem {
            id: seed.id,
            title: seed.title.to_string(),
            excerpt: seed.excerpt.to_string(),
            summary: seed.summary.to_string(),
            source_attribution_url: None,
            image_url: seed.image_url.to_string(),
            published_at: days_ago(seed.days_ago),
            views_label: seed.views_label.to_string(),
            view_count: seed.view_count,
            category: seed.category.to_string(),
            is_featured: seed.is_featured,
            is_popular: seed.is_popular,
        })
        .collect()
});

/// The embedded dataset, oldest id first. Publish dates are relative to
/// process start so the site always looks current when degraded.
pub fn fallback_news() -> &'static [NewsItem] {
    &FALLBACK_NEWS
}
