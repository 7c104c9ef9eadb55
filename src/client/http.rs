use async_trait::async_trait;

use crate::config::{HttpPoolConfig, SelectionConfig};
use crate::domain::model::Page;
use crate::error::{FetchError, SelectionError};

use super::wire::parse_page;
use super::PageClient;

/// [`PageClient`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpPageClient {
    client: reqwest::Client,
    base_url: String,
    fields: Option<String>,
}

impl HttpPageClient {
    pub fn new(config: &SelectionConfig) -> Result<Self, SelectionError> {
        config.validate()?;
        let client = Self::apply_pool_options(reqwest::Client::builder(), &config.pool)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SelectionError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing `reqwest::Client` (and its connection pool).
    pub fn with_client(client: reqwest::Client, config: &SelectionConfig) -> Self {
        let fields = (!config.fields.is_empty()).then(|| config.fields.join(","));
        Self {
            client,
            base_url: config.base_url.clone(),
            fields,
        }
    }

    fn apply_pool_options(
        mut builder: reqwest::ClientBuilder,
        pool: &HttpPoolConfig,
    ) -> reqwest::ClientBuilder {
        builder = builder
            .pool_max_idle_per_host(pool.pool_max_idle_per_host)
            .pool_idle_timeout(pool.pool_idle_timeout())
            .tcp_keepalive(pool.tcp_keepalive());

        if !pool.http2_enabled {
            builder = builder.http1_only();
        }

        builder
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PageClient for HttpPageClient {
    async fn fetch_page(&self, page_number: u64) -> Result<Page, FetchError> {
        let mut query = vec![("page", page_number.to_string())];
        if let Some(fields) = &self.fields {
            query.push(("fields", fields.clone()));
        }

        tracing::debug!(page = page_number, url = %self.base_url, "fetching page");
        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        parse_page(&text, page_number)
    }
}
