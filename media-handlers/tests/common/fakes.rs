//! Fake resolver and prober.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use media_resolver::{LinkResolver, MediaType, ResolveError, ResolveResult, SizeProber, UrlList};

enum Canned {
    Resolved(ResolveResult),
    MissingField(&'static str),
}

/// Returns a canned result and counts calls.
pub struct FakeResolver {
    canned: Canned,
    calls: AtomicUsize,
    links: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn resolving(result: ResolveResult) -> Self {
        Self::with(Canned::Resolved(result))
    }

    pub fn missing(field: &'static str) -> Self {
        Self::with(Canned::MissingField(field))
    }

    fn with(canned: Canned) -> Self {
        Self {
            canned,
            calls: AtomicUsize::new(0),
            links: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn links(&self) -> Vec<String> {
        self.links.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkResolver for FakeResolver {
    async fn resolve(&self, link: &str) -> Result<ResolveResult, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.links.lock().unwrap().push(link.to_string());
        match &self.canned {
            Canned::Resolved(result) => Ok(result.clone()),
            Canned::MissingField(field) => Err(ResolveError::MissingField(*field)),
        }
    }
}

/// Returns configured sizes; unknown URLs probe as `None`. Records probe order.
pub struct FakeProber {
    sizes: HashMap<String, u64>,
    probed: Mutex<Vec<String>>,
}

impl FakeProber {
    pub fn new() -> Self {
        Self {
            sizes: HashMap::new(),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_size(mut self, url: &str, size: u64) -> Self {
        self.sizes.insert(url.to_string(), size);
        self
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SizeProber for FakeProber {
    async fn probe(&self, url: &str) -> Option<u64> {
        self.probed.lock().unwrap().push(url.to_string());
        self.sizes.get(url).copied()
    }
}

pub fn single(url: &str, media_type: MediaType) -> ResolveResult {
    ResolveResult {
        url_list: UrlList::Single(url.to_string()),
        media_type,
        title: None,
        description: None,
    }
}

pub fn many(urls: &[&str], media_type: MediaType) -> ResolveResult {
    ResolveResult {
        url_list: UrlList::Many(urls.iter().map(|u| u.to_string()).collect()),
        media_type,
        title: None,
        description: None,
    }
}
