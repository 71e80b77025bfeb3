//! Application configuration. Backend endpoint, request timeout, local paths.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Rows requested by list pages unless KANAKKU_PAGE_LIMIT says otherwise.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Backend base URL including the `/api` segment. Read from KANAKKU_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Request timeout in seconds. Read from KANAKKU_TIMEOUT_SECS.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    pub data_dir: Option<String>,

    /// Where the bearer token is persisted. Defaults to `<data_dir>/session.json`.
    pub session_path: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Pages & Exports
    // ─────────────────────────────────────────────────────────────────────────
    /// Directory for CSV and Markdown exports. Defaults to `<data_dir>/exports`.
    #[serde(default)]
    pub export_dir: Option<String>,

    /// Rows requested by the clients, invoices, payments and products lists.
    #[serde(default)]
    pub page_limit: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("KANAKKU").try_parsing(true));
        if let Ok(path) = std::env::var("KANAKKU_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| crate::adapters::http::DEFAULT_BASE_URL.to_string())
    }

    /// Request timeout. Zero falls back to the default.
    pub fn timeout_or_default(&self) -> Duration {
        self.timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(crate::adapters::http::DEFAULT_TIMEOUT)
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    pub fn session_path_or_default(&self) -> PathBuf {
        self.session_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir_or_default().join("session.json"))
    }

    pub fn export_dir_or_default(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir_or_default().join("exports"))
    }

    /// Page size for list requests. Zero falls back to the default.
    pub fn page_limit_or_default(&self) -> u32 {
        self.page_limit
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_url_or_default(), "http://localhost:5000/api");
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(20));
        assert_eq!(cfg.session_path_or_default(), Path::new("./data/session.json"));
        assert_eq!(cfg.export_dir_or_default(), Path::new("./data/exports"));
        assert_eq!(cfg.page_limit_or_default(), 100);
    }

    #[test]
    fn test_paths_follow_data_dir() {
        let cfg = AppConfig {
            data_dir: Some("/var/lib/kanakku".into()),
            export_dir: Some("/tmp/out".into()),
            ..AppConfig::default()
        };
        assert_eq!(
            cfg.session_path_or_default(),
            Path::new("/var/lib/kanakku/session.json")
        );
        assert_eq!(cfg.export_dir_or_default(), Path::new("/tmp/out"));
    }

    #[test]
    fn test_zero_values_fall_back() {
        let cfg = AppConfig {
            timeout_secs: Some(0),
            page_limit: Some(0),
            api_url: Some("  ".into()),
            ..AppConfig::default()
        };
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(20));
        assert_eq!(cfg.page_limit_or_default(), 100);
        assert_eq!(cfg.api_url_or_default(), "http://localhost:5000/api");
    }
}
