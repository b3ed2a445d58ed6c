//! Link handling for directory listings
//!
//! Listing pages only ever link to their own children with relative hrefs, so
//! everything else (self references, query variants, absolute targets) is
//! filtered out before a link is followed or reported.

mod filter;

pub use filter::passes_filter;

/// Shape of a discovered href
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Ends with a path separator; crawled as a child listing
    Directory,
    /// Anything else; only reported
    Leaf,
}

impl LinkKind {
    /// Classifies an href by its trailing separator
    pub fn of(href: &str) -> Self {
        if href.ends_with('/') {
            Self::Directory
        } else {
            Self::Leaf
        }
    }

    /// Returns true for links that spawn a child task
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// Builds the absolute location of a child link
///
/// Listing hrefs are relative to the page they appear on, and listing URLs end
/// with a separator, so the child is the plain concatenation of the two. No
/// normalization takes place: `../` stays in the result as written.
///
/// # Examples
///
/// ```
/// use index_ripple::link::child_url;
///
/// assert_eq!(child_url("http://h/pub/", "a.txt"), "http://h/pub/a.txt");
/// assert_eq!(child_url("http://h/", "sub/"), "http://h/sub/");
/// ```
pub fn child_url(parent: &str, href: &str) -> String {
    let mut url = String::with_capacity(parent.len() + href.len());
    url.push_str(parent);
    url.push_str(href);
    url
}
