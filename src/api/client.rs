//! HTTP client for the stock health backend.

use super::StockQuery;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::state::{PageResult, StockDetail};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Read access to the stock endpoints.
///
/// The sync layer only talks to this trait, so pollers and the search
/// debouncer can run against a mock in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockApi: Send + Sync {
    /// `GET /api/stocks/` with the given query.
    async fn fetch_stocks(&self, query: &StockQuery) -> Result<PageResult>;

    /// `GET /api/stocks/{ticker}/`.
    async fn fetch_stock(&self, ticker: &str) -> Result<StockDetail>;
}

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::new(self.config)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// reqwest-backed implementation of [`StockApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base = Url::parse(config.base_url.trim())
            .map_err(|e| Error::config(format!("invalid api.base_url {:?}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "api.base_url {:?} cannot be used as a base URL",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("marketsentry/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/api/stocks/`, or `{base}/api/stocks/{ticker}/` when a ticker is given.
    pub fn stocks_url(&self, ticker: Option<&str>) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::config("api.base_url cannot be used as a base URL"))?;
            segments.pop_if_empty().extend(["api", "stocks"]);
            if let Some(ticker) = ticker {
                segments.push(ticker);
            }
            segments.push("");
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        tracing::debug!(%url, ?query, "GET");

        let response = self.http.get(url.clone()).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!("{url} returned {status}")));
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)?;
        tracing::debug!(%url, bytes = body.len(), "response decoded");
        Ok(value)
    }
}

#[async_trait]
impl StockApi for ApiClient {
    async fn fetch_stocks(&self, query: &StockQuery) -> Result<PageResult> {
        let url = self.stocks_url(None)?;
        self.get_json(url, &query.to_pairs()).await
    }

    async fn fetch_stock(&self, ticker: &str) -> Result<StockDetail> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(Error::invalid_input("ticker must not be empty"));
        }
        let url = self.stocks_url(Some(ticker))?;
        self.get_json(url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn client(base: &str) -> ApiClient {
        assert_ok!(ApiClientBuilder::new().base_url(base).build())
    }

    #[test]
    fn test_list_url() {
        let client = client("http://127.0.0.1:8000");
        let url = assert_ok!(client.stocks_url(None));
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/stocks/");
    }

    #[test]
    fn test_detail_url_keeps_prefix_and_encodes_ticker() {
        let client = client("https://example.test/backend/");
        let url = assert_ok!(client.stocks_url(Some("M&M")));
        assert_eq!(url.as_str(), "https://example.test/backend/api/stocks/M&M/");

        let url = assert_ok!(client.stocks_url(Some("A B")));
        assert_eq!(url.as_str(), "https://example.test/backend/api/stocks/A%20B/");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = assert_err!(ApiClientBuilder::new().base_url("not a url").build());
        assert!(matches!(err, Error::Config(_)));

        let err = assert_err!(ApiClientBuilder::new().base_url("mailto:ops@example.test").build());
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_empty_ticker_is_rejected_before_request() {
        let client = client("http://127.0.0.1:8000");
        let err = assert_err!(client.fetch_stock("  ").await);
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_fetch_failure() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = client("http://127.0.0.1:9");
        let err = assert_err!(client.fetch_stocks(&StockQuery::default()).await);
        assert!(err.is_fetch_failure());
    }
}
