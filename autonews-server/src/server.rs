//! Router assembly and server startup.

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use autonews_core::config::Config;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/news/page/{page}", get(handlers::news_page))
        .route("/news/{slug}", get(handlers::article))
        .route("/categories", get(handlers::categories_index))
        .route("/about", get(handlers::about))
        .route("/contact", get(handlers::contact))
        .route("/copyright", get(handlers::copyright))
        .route("/manifest.webmanifest", get(handlers::manifest))
        .route("/category/{segment}", get(handlers::category))
        .route("/category/{segment}/page/{page}", get(handlers::category_page))
        .route("/rss.xml", get(handlers::rss))
        .route("/sitemap.xml", get(handlers::sitemap))
        .route("/news-sitemap.xml", get(handlers::news_sitemap))
        .route("/robots.txt", get(handlers::robots))
        // Root-level catch-all for malformed legacy article links.
        .route("/{legacy}", get(handlers::legacy_or_not_found))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, port: u16) -> Result<()> {
    let state = AppState::new(config);
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Serving on http://localhost:{}", port);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
