//! HTML parser for directory listing pages
//!
//! Extracts the two things the crawler looks at: the page title, which tells a
//! listing apart from an ordinary page, and the raw `href` of every anchor in
//! document order. Hrefs are returned exactly as written; filtering and
//! joining happen in the crawler.

use crate::ParseError;
use scraper::{Html, Selector};

/// Title marker written by Apache, nginx, lighttpd and friends
pub const LISTING_TITLE_MARKER: &str = "Index of";

/// Extracted information from a fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedListing {
    /// Text of the `<title>` elements, empty when there is none
    pub title: String,

    /// Anchor hrefs in document order
    pub hrefs: Vec<String>,
}

impl ParsedListing {
    /// Returns true when the title marks an auto-generated file index
    ///
    /// Case-sensitive, like the servers that emit it.
    pub fn is_directory_listing(&self) -> bool {
        self.title.contains(LISTING_TITLE_MARKER)
    }
}

/// Turns a response body into a parsed listing
pub trait Extractor: Send + Sync {
    /// Extracts the title and anchor hrefs from a response body
    ///
    /// A failure ends only the task whose page it was.
    fn extract(&self, body: &[u8]) -> Result<ParsedListing, ParseError>;
}

/// Extractor backed by `scraper`
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    title: Selector,
    anchors: Selector,
}

impl HtmlExtractor {
    /// Creates an extractor with its selectors compiled
    pub fn new() -> Self {
        Self {
            title: Selector::parse("title").expect("static selector"),
            anchors: Selector::parse("a[href]").expect("static selector"),
        }
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for HtmlExtractor {
    /// Parses `body` as HTML
    ///
    /// Bytes that are not valid UTF-8 (Latin-1 file names are common on
    /// older servers) decode to U+FFFD instead of failing the page, so this
    /// never returns an error.
    fn extract(&self, body: &[u8]) -> Result<ParsedListing, ParseError> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let title = document
            .select(&self.title)
            .flat_map(|element| element.text())
            .collect::<String>();

        let hrefs = document
            .select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect();

        Ok(ParsedListing { title, hrefs })
    }
}
