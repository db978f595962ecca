//! Page fetching
//!
//! This module defines the fetch seam used by the walker and its HTTP
//! implementation:
//! - Building an HTTP client with a descriptive user agent
//! - GET requests for article pages (redirects followed by the client)
//! - Retry logic for transient failures
//! - Error classification into `FetchError`

use crate::config::{Config, FetchConfig, UserAgentConfig};
use crate::content::{parse_article, PageContent};
use crate::title::PageId;
use crate::{FetchError, WalkError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Source of article content
///
/// Implementations resolve redirects themselves and return only the
/// article body, in document order, tagged with the title the page was
/// served under when it is known. Errors are returned, not retried by the
/// caller.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, page: &PageId) -> Result<PageContent, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Identification sent with every request
/// * `fetch` - Timeouts
/// * `https_only` - Refuse plain HTTP (set when the wiki is served over HTTPS)
///
/// # Example
///
/// ```no_run
/// use philosophy_walk::config::{FetchConfig, UserAgentConfig};
/// use philosophy_walk::walker::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetchConfig::default(), true).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetch: &FetchConfig,
    https_only: bool,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .connect_timeout(Duration::from_secs(fetch.connect_timeout_secs))
        .https_only(https_only)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Outcome of a single HTTP attempt
enum Attempt {
    Done(Result<PageContent, FetchError>),
    Retry(FetchError),
}

/// Fetches articles over HTTP and parses their body
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 404 | Immediate → NotFound |
/// | HTTP 429 | Immediate → RateLimited |
/// | HTTP 5xx | Retry up to `max_retries` times |
/// | Timeout | Retry up to `max_retries` times |
/// | Connection failure | Immediate → Network |
/// | Other non-2xx | Immediate → Status |
/// | Non-HTML body | Immediate → NotHtml |
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher that does not retry
    pub fn new(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            max_retries: 0,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Builds the client and fetcher described by the configuration
    pub fn from_config(config: &Config) -> Result<Self, WalkError> {
        let base_url = config.base_url()?;
        let client = build_http_client(
            &config.user_agent,
            &config.fetch,
            base_url.scheme() == "https",
        )?;

        Ok(Self::new(client, base_url).with_retries(
            config.fetch.max_retries,
            Duration::from_millis(config.fetch.retry_delay_ms),
        ))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn attempt(&self, page: &PageId, url: &Url) -> Attempt {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Attempt::Retry(FetchError::Timeout {
                    page: page.to_string(),
                })
            }
            Err(e) => {
                return Attempt::Done(Err(FetchError::Network {
                    page: page.to_string(),
                    message: e.to_string(),
                }))
            }
        };

        let status = response.status();
        let final_url = response.url().clone();

        if status == StatusCode::NOT_FOUND {
            return Attempt::Done(Err(FetchError::NotFound {
                page: page.to_string(),
            }));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Attempt::Done(Err(FetchError::RateLimited {
                page: page.to_string(),
            }));
        }

        if status.is_server_error() {
            return Attempt::Retry(FetchError::Status {
                page: page.to_string(),
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Attempt::Done(Err(FetchError::Status {
                page: page.to_string(),
                status: status.as_u16(),
            }));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Attempt::Done(Err(FetchError::NotHtml {
                page: page.to_string(),
                content_type,
            }));
        }

        if final_url != *url {
            tracing::debug!("{} redirected to {}", url, final_url);
        }

        match response.text().await {
            Ok(body) => Attempt::Done(Ok(parse_article(&body, &final_url))),
            Err(e) if e.is_timeout() => Attempt::Retry(FetchError::Timeout {
                page: page.to_string(),
            }),
            Err(e) => Attempt::Done(Err(FetchError::Network {
                page: page.to_string(),
                message: e.to_string(),
            })),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, page: &PageId) -> Result<PageContent, FetchError> {
        let url = page
            .article_url(&self.base_url)
            .map_err(|e| FetchError::InvalidTitle {
                page: page.to_string(),
                message: e.to_string(),
            })?;

        let mut retries = 0;
        loop {
            tracing::debug!("Fetching {}", url);

            match self.attempt(page, &url).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(error) if retries < self.max_retries => {
                    retries += 1;
                    tracing::warn!(
                        "{} (retry {}/{} in {}ms)",
                        error,
                        retries,
                        self.max_retries,
                        self.retry_delay.as_millis()
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Attempt::Retry(error) => return Err(error),
            }
        }
    }
}
