//! Session configuration.
//!
//! [`SelectionConfig`] deserializes with per-field defaults, so a partial
//! document (or none at all) yields a usable configuration. Environment
//! overrides are applied by [`SelectionConfig::from_env`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SelectionError, SelectionResult};

pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1/artworks";
pub const DEFAULT_PAGE_SIZE: u64 = 12;
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "PAGESEL_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "PAGESEL_PAGE_SIZE";
pub const ENV_MAX_CONCURRENCY: &str = "PAGESEL_MAX_CONCURRENCY";
pub const ENV_TIMEOUT_SECS: &str = "PAGESEL_TIMEOUT_SECS";
pub const ENV_FIELDS: &str = "PAGESEL_FIELDS";

/// Connection pool options applied to the underlying `reqwest::Client`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpPoolConfig {
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
    /// `None` disables TCP keepalive.
    pub tcp_keepalive_secs: Option<u64>,
    pub http2_enabled: bool,
}

impl Default for HttpPoolConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 10,
            pool_idle_timeout_secs: 90,
            tcp_keepalive_secs: Some(60),
            http2_enabled: true,
        }
    }
}

impl HttpPoolConfig {
    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }

    pub fn tcp_keepalive(&self) -> Option<Duration> {
        self.tcp_keepalive_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Records per page on the remote endpoint. Constant for a session.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Upper bound on simultaneous page requests during a bulk selection.
    /// `1` runs the plan sequentially.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Field projection sent as `fields=a,b,c`. Empty sends no projection.
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub pool: HttpPoolConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_max_concurrent_fetches() -> usize {
    DEFAULT_MAX_CONCURRENT_FETCHES
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            fields: Vec::new(),
            pool: HttpPoolConfig::default(),
        }
    }
}

impl SelectionConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `PAGESEL_*` environment variables.
    pub fn from_env() -> SelectionResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `PAGESEL_*` key.
    pub fn from_lookup<F>(lookup: F) -> SelectionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            config.page_size = parse_number(ENV_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_CONCURRENCY) {
            config.max_concurrent_fetches = parse_number(ENV_MAX_CONCURRENCY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FIELDS) {
            config.fields = raw
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SelectionResult<()> {
        if self.page_size == 0 {
            return Err(SelectionError::InvalidPageSize(0));
        }
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| SelectionError::Config(format!("invalid base_url '{}': {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SelectionError::Config(format!(
                "unsupported base_url scheme: {}",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// Concurrency limit with a floor of one.
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> SelectionResult<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| SelectionError::Config(format!("{}='{}': {}", key, raw, e)))
}
