use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tracing::{debug, instrument, warn};

use crate::error::IngestError;

/// Limits applied when downloading a remote document.
#[derive(Debug, Clone, Copy)]
pub struct FetchConfig {
    /// Deadline for the whole download.
    pub timeout: Duration,
    /// Largest body accepted, in bytes.
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Downloads documents referenced by URL so they can be ingested like uploads.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl DocumentFetcher {
    /// Build a fetcher with its own HTTP client.
    pub fn new(config: FetchConfig) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IngestError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Configured limits.
    pub fn config(&self) -> FetchConfig {
        self.config
    }

    /// Download `url` into memory.
    ///
    /// Non-2xx responses and transport errors become [`IngestError::Fetch`].
    /// Bodies larger than `max_bytes` become [`IngestError::TooLarge`], checked
    /// against `Content-Length` up front and again while streaming.
    #[instrument(name = "fetcher.fetch", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Bytes, IngestError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| IngestError::Fetch(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "remote document returned non-success status");
            return Err(IngestError::Fetch(format!("unexpected status {status}")));
        }

        let limit = self.config.max_bytes;
        if let Some(len) = response.content_length()
            && len > limit
        {
            return Err(IngestError::TooLarge { size: len, limit });
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| IngestError::Fetch(format!("failed to read body: {e}")))?
        {
            let size = (body.len() + chunk.len()) as u64;
            if size > limit {
                return Err(IngestError::TooLarge { size, limit });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(size = body.len(), "remote document downloaded");
        Ok(body.freeze())
    }
}
