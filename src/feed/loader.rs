use crate::feed::endpoint::endpoint_url;
use crate::feed::types::{Article, FeedState};
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching an article list.
///
/// None of these reach the user: [`FeedLoader::load`] collapses all of them
/// into the empty [`FeedState`] and logs the detail.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {status} for {url}")]
    HttpStatus { status: u16, url: String },
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Body was not a JSON array of articles
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// The configured base URL cannot carry an endpoint path
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Fetches article lists from the news API.
///
/// One GET per call, no retries: a failed fetch simply yields the empty state.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl FeedLoader {
    /// Build a loader with its own HTTP client.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(timeout)
            .user_agent(concat!("newsdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url, timeout))
    }

    pub fn with_client(client: reqwest::Client, base_url: Url, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch and decode the article list for `(category, language)`.
    ///
    /// Neither argument is validated; both go to the API as given.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] - connection, TLS or body read errors
    /// - [`FetchError::Timeout`] - request exceeded the timeout
    /// - [`FetchError::HttpStatus`] - non-2xx response
    /// - [`FetchError::ResponseTooLarge`] - body over 10MB
    /// - [`FetchError::Decode`] - body is not an array of article objects
    pub async fn fetch_articles(
        &self,
        category: &str,
        language: &str,
    ) -> Result<Vec<Article>, FetchError> {
        let url = endpoint_url(&self.base_url, category, language)
            .ok_or_else(|| FetchError::InvalidBaseUrl(self.base_url.to_string()))?;

        tracing::debug!(url = %url, "Fetching articles");

        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status().as_u16(),
                url: response.url().to_string(),
            });
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;

        // `null` decodes like an empty list
        let articles: Option<Vec<Article>> = serde_json::from_slice(&bytes)?;
        Ok(articles.unwrap_or_default())
    }

    /// Fetch and split into a [`FeedState`].
    ///
    /// Transport failures, error statuses, undecodable bodies and empty
    /// lists all produce [`FeedState::empty`].
    pub async fn load(&self, category: &str, language: &str) -> FeedState {
        match self.fetch_articles(category, language).await {
            Ok(articles) => {
                tracing::debug!(
                    category = %category,
                    language = %language,
                    count = articles.len(),
                    "Articles loaded"
                );
                FeedState::from_articles(articles)
            }
            Err(e) => {
                tracing::warn!(
                    category = %category,
                    language = %language,
                    error = %e,
                    "Error fetching news"
                );
                FeedState::empty()
            }
        }
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
