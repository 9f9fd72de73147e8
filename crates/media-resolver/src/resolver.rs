//! Resolver API client: turns a shared link into direct media URLs.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::ResolveError;
use crate::types::{MediaType, ResolveResult, UrlList};

/// Default resolver endpoint.
pub const DEFAULT_RESOLVER_URL: &str = "https://api.lau.plus/media/newapi.php";

/// Identification sent as `user`, `mac` and `clientid` on every request.
pub const RESOLVER_CLIENT_ID: &str = "tgbot";

/// Resolves a shared link into media URLs.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, link: &str) -> Result<ResolveResult, ResolveError>;
}

/// HTTP client for the resolver API.
#[derive(Debug, Clone)]
pub struct ApiResolver {
    client: Client,
    endpoint: String,
}

impl ApiResolver {
    /// Creates a resolver with its own HTTP client.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a resolver sharing an existing HTTP client.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResolveRequest<'a> {
    url: &'a str,
    user: &'a str,
    mac: &'a str,
    clientid: &'a str,
}

impl<'a> ResolveRequest<'a> {
    fn new(url: &'a str) -> Self {
        Self {
            url,
            user: RESOLVER_CLIENT_ID,
            mac: RESOLVER_CLIENT_ID,
            clientid: RESOLVER_CLIENT_ID,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResolveResponse {
    data: Option<ResolveData>,
}

#[derive(Debug, Deserialize)]
struct ResolveData {
    url_list: Option<UrlList>,
    #[serde(rename = "type")]
    media_type: Option<String>,
    title: Option<String>,
    desc: Option<String>,
}

impl TryFrom<ResolveResponse> for ResolveResult {
    type Error = ResolveError;

    fn try_from(response: ResolveResponse) -> Result<Self, Self::Error> {
        let data = response.data.ok_or(ResolveError::MissingField("data"))?;
        let url_list = data.url_list.ok_or(ResolveError::MissingField("url_list"))?;
        let media_type = data.media_type.ok_or(ResolveError::MissingField("type"))?;
        Ok(ResolveResult {
            url_list,
            media_type: MediaType::from_wire(&media_type),
            title: data.title,
            description: data.desc,
        })
    }
}

#[async_trait]
impl LinkResolver for ApiResolver {
    /// Posts `{url, user, mac, clientid}` to the resolver and validates `data.url_list` and `data.type`.
    ///
    /// Network failures, non-2xx statuses, bodies that are not the expected JSON and missing fields
    /// all come back as [`ResolveError`]; the caller reports them to the user as one message.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn resolve(&self, link: &str) -> Result<ResolveResult, ResolveError> {
        info!(link_len = link.len(), "step: resolver request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ResolveRequest::new(link))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status, "Resolver returned non-success status");
            return Err(ResolveError::Status { status, body });
        }

        let parsed: ResolveResponse = response.json().await?;
        let result = ResolveResult::try_from(parsed)?;

        info!(
            media_type = %result.media_type,
            url_count = result.url_list.len(),
            "step: resolver done"
        );
        Ok(result)
    }
}
