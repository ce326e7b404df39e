//! # autonews-render
//!
//! Template rendering library for the AutoNews site.
//!
//! This crate handles HTML template rendering using Askama.

pub mod templates;

pub use templates::{
    pagination_links, AboutTemplate, ArticleTemplate, CategoriesTemplate, CategoryEntry,
    CategoryTemplate, ContactTemplate, CopyrightTemplate, HomeTemplate, NewsCardEntry,
    NotFoundTemplate, PageLink, PopularEntry, SiteMeta,
};
