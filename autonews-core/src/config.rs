//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

use crate::slug::SlugDialect;

/// Environment variables that override the store block from the file.
pub const STORE_URL_ENV: &str = "AUTONEWS_STORE_URL";
pub const STORE_KEY_ENV: &str = "AUTONEWS_STORE_KEY";

const DEFAULT_SITE_URL: &str = "http://localhost:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the autonews.yml schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Remote store credentials. Absent means every read serves the
    /// embedded fallback dataset.
    #[serde(default)]
    pub store: Option<StoreConfig>,

    #[serde(default)]
    pub analytics: Option<AnalyticsConfig>,

    #[serde(default)]
    pub slug_dialect: SlugDialect,

    #[serde(default = "default_true")]
    pub enable_rss: bool,

    #[serde(default = "default_true")]
    pub enable_sitemap: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub url: String,

    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    String::from("en-US")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the REST endpoint, e.g. "https://project.example.co".
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub ga_measurement_id: String,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment
    /// overrides for the store credentials.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        let url = std::env::var(STORE_URL_ENV).ok().filter(|v| !v.is_empty());
        let key = std::env::var(STORE_KEY_ENV).ok().filter(|v| !v.is_empty());

        match (url, key) {
            (Some(url), Some(anon_key)) => {
                self.store = Some(StoreConfig { url, anon_key });
            }
            (Some(url), None) => {
                if let Some(store) = self.store.as_mut() {
                    store.url = url;
                }
            }
            (None, Some(anon_key)) => {
                if let Some(store) = self.store.as_mut() {
                    store.anon_key = anon_key;
                }
            }
            (None, None) => {}
        }
    }

    /// Site origin with no path or trailing slash, for absolute link
    /// construction in feeds. Unparseable URLs fall back to the default
    /// local origin instead of failing.
    pub fn site_origin(&self) -> String {
        Url::parse(&self.site.url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .map(|url| url.origin().ascii_serialization())
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
    }

    /// Analytics is on only when a non-empty measurement id is configured.
    pub fn ga_measurement_id(&self) -> Option<&str> {
        self.analytics
            .as_ref()
            .map(|a| a.ga_measurement_id.trim())
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = base_config(
            r#"
site:
  title: "AutoNews"
  description: "Automotive news"
  url: "https://autonews.example"
"#,
        );

        assert_eq!(config.server.port, 3000);
        assert!(config.store.is_none());
        assert!(config.analytics.is_none());
        assert_eq!(config.slug_dialect, SlugDialect::TitleOnly);
        assert!(config.enable_rss);
        assert!(config.enable_sitemap);
        assert_eq!(config.site.language, "en-US");
    }

    #[test]
    fn test_full_config() {
        let config = base_config(
            r#"
site:
  title: "AutoNews"
  description: "Automotive news"
  url: "https://autonews.example/some/path"
  language: "uk-UA"
server:
  port: 8080
store:
  url: "https://project.example.co"
  anon_key: "anon-123"
analytics:
  ga_measurement_id: "G-TEST123"
slug_dialect: title-and-id
enable_rss: false
"#,
        );

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.as_ref().unwrap().anon_key, "anon-123");
        assert_eq!(config.ga_measurement_id(), Some("G-TEST123"));
        assert_eq!(config.slug_dialect, SlugDialect::TitleAndId);
        assert!(!config.enable_rss);
        assert_eq!(config.site_origin(), "https://autonews.example");
    }

    #[test]
    fn test_site_origin_fallback() {
        let config = base_config(
            r#"
site:
  title: "AutoNews"
  description: "Automotive news"
  url: "not a url"
"#,
        );
        assert_eq!(config.site_origin(), "http://localhost:3000");
    }

    #[test]
    fn test_env_overrides_replace_store_block() {
        let mut config = base_config(
            r#"
site:
  title: "AutoNews"
  description: "Automotive news"
  url: "https://autonews.example"
"#,
        );

        std::env::set_var(STORE_URL_ENV, "https://env.example.co");
        std::env::set_var(STORE_KEY_ENV, "env-key");
        config.apply_env_overrides();
        std::env::remove_var(STORE_URL_ENV);
        std::env::remove_var(STORE_KEY_ENV);

        let store = config.store.expect("store configured from env");
        assert_eq!(store.url, "https://env.example.co");
        assert_eq!(store.anon_key, "env-key");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autonews.yml");
        std::fs::write(
            &path,
            r#"
site:
  title: "AutoNews"
  description: "Automotive news"
  url: "https://autonews.example"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.site.title, "AutoNews");
    }
}
