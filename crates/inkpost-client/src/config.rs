//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the client runs with zero configuration,
//! in which case it serves the bundled offline dataset.

use std::path::PathBuf;
use std::time::Duration;

use inkpost_shared::constants::{API_ORIGIN, FEED_PAGE_SIZE, REQUEST_TIMEOUT_SECS};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whether the live API is used at all. When `false` the feed is served
    /// from the bundled dataset without touching the network.
    /// Env: `BACKEND_AVAILABLE` (true/false)
    /// Default: `false`
    pub backend_available: bool,

    /// Base URL of the blog API.
    /// Env: `BASE_API_URL`
    /// Default: the hosted API
    pub base_api_url: String,

    /// Origin prepended to `/uploads/` and `/storage/` image paths.
    /// Env: `ASSET_ORIGIN`
    /// Default: the hosted API
    pub asset_origin: String,

    /// Per-request timeout.
    /// Env: `REQUEST_TIMEOUT_SECS`
    /// Default: 15 seconds
    pub request_timeout: Duration,

    /// Posts per feed page.
    /// Env: `FEED_PAGE_SIZE`
    /// Default: `5`
    pub feed_page_size: u32,

    /// Where the session database lives.
    /// Env: `SESSION_DB_PATH`
    /// Default: the platform data directory
    pub session_db_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_available: false,
            base_api_url: API_ORIGIN.to_string(),
            asset_origin: API_ORIGIN.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            feed_page_size: FEED_PAGE_SIZE,
            session_db_path: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("BACKEND_AVAILABLE") {
            config.backend_available = parse_flag(&val);
        }

        if let Some(url) = lookup("BASE_API_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                tracing::warn!("Empty BASE_API_URL, using default");
            } else {
                config.base_api_url = url.to_string();
            }
        }

        if let Some(origin) = lookup("ASSET_ORIGIN") {
            let origin = origin.trim();
            if !origin.is_empty() {
                config.asset_origin = origin.trim_end_matches('/').to_string();
            }
        }

        if let Some(val) = lookup("REQUEST_TIMEOUT_SECS") {
            match val.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %val, "Invalid REQUEST_TIMEOUT_SECS, using default"),
            }
        }

        if let Some(val) = lookup("FEED_PAGE_SIZE") {
            match val.trim().parse::<u32>() {
                Ok(n) if n > 0 => config.feed_page_size = n,
                _ => tracing::warn!(value = %val, "Invalid FEED_PAGE_SIZE, using default"),
            }
        }

        if let Some(path) = lookup("SESSION_DB_PATH") {
            if !path.is_empty() {
                config.session_db_path = Some(PathBuf::from(path));
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(val.trim().to_ascii_lowercase().as_str(), "true" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(!config.backend_available);
        assert_eq!(config.base_api_url, API_ORIGIN);
        assert_eq!(config.feed_page_size, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BACKEND_AVAILABLE", "true"),
            ("BASE_API_URL", "http://localhost:3000/"),
            ("FEED_PAGE_SIZE", "8"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("SESSION_DB_PATH", "/tmp/inkpost.db"),
        ]));
        assert!(config.backend_available);
        assert_eq!(config.base_api_url, "http://localhost:3000");
        assert_eq!(config.feed_page_size, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.session_db_path, Some(PathBuf::from("/tmp/inkpost.db")));
        // asset origin is independent of the API base
        assert_eq!(config.asset_origin, API_ORIGIN);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BACKEND_AVAILABLE", "yes please"),
            ("FEED_PAGE_SIZE", "0"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
            ("BASE_API_URL", "  "),
        ]));
        assert!(!config.backend_available);
        assert_eq!(config.feed_page_size, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.base_api_url, API_ORIGIN);
    }
}
