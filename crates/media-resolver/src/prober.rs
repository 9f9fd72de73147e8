//! Metadata-only size probe.

use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::ProbeError;

/// Reports the byte length of a remote media URL without downloading it.
#[async_trait]
pub trait SizeProber: Send + Sync {
    /// `None` when the size cannot be determined; never fails.
    async fn probe(&self, url: &str) -> Option<u64>;
}

/// `HEAD` + `Content-Length` prober.
#[derive(Debug, Clone, Default)]
pub struct HttpSizeProber {
    client: Client,
}

impl HttpSizeProber {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Reads the header directly: for `HEAD` the response body is empty, so the body size hint is useless.
    async fn content_length(&self, url: &str) -> Result<u64, ProbeError> {
        let response = self.client.head(url).send().await?;
        if !response.status().is_success() {
            return Err(ProbeError::Status(response.status().as_u16()));
        }
        let value = response
            .headers()
            .get(CONTENT_LENGTH)
            .ok_or(ProbeError::MissingLength)?;
        let text = value
            .to_str()
            .map_err(|_| ProbeError::InvalidLength(format!("{:?}", value)))?;
        text.trim()
            .parse::<u64>()
            .map_err(|_| ProbeError::InvalidLength(text.to_string()))
    }
}

#[async_trait]
impl SizeProber for HttpSizeProber {
    #[instrument(skip(self))]
    async fn probe(&self, url: &str) -> Option<u64> {
        match self.content_length(url).await {
            Ok(size) => {
                debug!(size, "step: size probe done");
                Some(size)
            }
            Err(e) => {
                warn!(error = %e, "Failed to get file size");
                None
            }
        }
    }
}
