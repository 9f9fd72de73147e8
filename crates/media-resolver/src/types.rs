//! Resolver result model.

use serde::Deserialize;
use std::fmt;

/// Shown when the resolver gives no title.
pub const DEFAULT_TITLE: &str = "未知标题";
/// Shown when the resolver gives no description.
pub const DEFAULT_DESCRIPTION: &str = "未知正文";

/// Kind of media behind the resolved URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Photo,
    Video,
    /// Anything else; keeps the raw resolver value for the user-facing message.
    Unknown(String),
}

impl MediaType {
    /// Maps the resolver's `type` field. The resolver reports photo posts as `images`.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "images" | "image" | "photo" => MediaType::Photo,
            "video" => MediaType::Video,
            other => MediaType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Photo => f.write_str("images"),
            MediaType::Video => f.write_str("video"),
            MediaType::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// `url_list` as returned by the resolver: a bare string or an array.
///
/// The shape matters: an array is dispatched as a batch even when it holds a single URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UrlList {
    Single(String),
    Many(Vec<String>),
}

impl UrlList {
    /// All URLs in resolver order.
    pub fn urls(&self) -> Vec<&str> {
        match self {
            UrlList::Single(url) => vec![url.as_str()],
            UrlList::Many(urls) => urls.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            UrlList::Single(_) => 1,
            UrlList::Many(urls) => urls.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A successfully resolved link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResult {
    pub url_list: UrlList,
    pub media_type: MediaType,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ResolveResult {
    /// Title, or [`DEFAULT_TITLE`] when absent or empty.
    pub fn title_or_default(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }

    /// Description, or [`DEFAULT_DESCRIPTION`] when absent or empty.
    pub fn description_or_default(&self) -> &str {
        non_empty(self.description.as_deref()).unwrap_or(DEFAULT_DESCRIPTION)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
