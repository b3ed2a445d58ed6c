//! HTTP fetcher implementation
//!
//! Task processing only needs two things from a response: the declared
//! Content-Type and the body. The `Fetcher` trait is that seam; `HttpFetcher`
//! is the reqwest-backed implementation used by the binary.

use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;

/// A successfully retrieved response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Content-Type header value, empty when absent
    pub content_type: String,

    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Returns true when the response declares hypertext markup
    ///
    /// The check is a case-sensitive prefix match, so `text/html; charset=utf-8`
    /// passes and `TEXT/HTML` does not.
    pub fn is_html(&self) -> bool {
        self.content_type.starts_with("text/html")
    }
}

/// Retrieves the page behind a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`
    ///
    /// Transport failures, unsuccessful statuses and truncated bodies all come
    /// back as `FetchError`.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Builds the HTTP client used for listing pages
///
/// Redirects follow reqwest's default policy. There is no request timeout:
/// a crawl runs until every fetch has returned.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage {
            content_type,
            body: body.to_vec(),
        })
    }
}
