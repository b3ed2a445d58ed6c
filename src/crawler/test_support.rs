//! In-memory fetcher and extractor for crawl tests

use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::crawler::parser::{Extractor, HtmlExtractor, ParsedListing};
use crate::{FetchError, ParseError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Builds a listing page linking to `hrefs`
pub fn listing(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{}\">{}</a>\n", href, href))
        .collect();
    format!(
        "<html><head><title>Index of /</title></head><body><pre>\n{}</pre></body></html>",
        anchors
    )
}

/// Serves canned responses and records every URL it was asked for
#[derive(Clone, Default)]
pub struct StaticFetcher {
    pages: Arc<HashMap<String, Result<FetchedPage, FetchError>>>,
    fetched: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(mut self, url: &str, outcome: Result<FetchedPage, FetchError>) -> Self {
        Arc::make_mut(&mut self.pages).insert(url.to_string(), outcome);
        self
    }

    pub fn html(self, url: &str, body: &str) -> Self {
        self.page(url, "text/html", body)
    }

    pub fn page(self, url: &str, content_type: &str, body: &str) -> Self {
        self.bytes(url, content_type, body.as_bytes().to_vec())
    }

    pub fn bytes(self, url: &str, content_type: &str, body: Vec<u8>) -> Self {
        let page = FetchedPage {
            content_type: content_type.to_string(),
            body,
        };
        self.insert(url, Ok(page))
    }

    pub fn fail(self, url: &str, error: FetchError) -> Self {
        self.insert(url, Err(error))
    }

    /// Sleeps this long inside every fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs fetched so far, in call order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.pages.get(url) {
            Some(outcome) => outcome.clone(),
            None => Err(FetchError::Status(404)),
        }
    }
}

/// Parses like `HtmlExtractor` but fails any body containing `marker`
pub struct CorruptExtractor {
    inner: HtmlExtractor,
    marker: &'static str,
}

impl CorruptExtractor {
    pub fn new(marker: &'static str) -> Self {
        Self {
            inner: HtmlExtractor::new(),
            marker,
        }
    }
}

impl Extractor for CorruptExtractor {
    fn extract(&self, body: &[u8]) -> Result<ParsedListing, ParseError> {
        let marker = self.marker.as_bytes();
        if body.windows(marker.len()).any(|window| window == marker) {
            return Err(ParseError::Malformed(self.marker.to_string()));
        }
        self.inner.extract(body)
    }
}
