use std::time::Duration;

use serde::Deserialize;

/// Request size limit and deadlines for external calls.
#[derive(Debug, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted request body (and downloaded document) in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Deadline for a single object-store write.
    #[serde(default = "default_storage_timeout")]
    pub storage_timeout_seconds: u64,
    /// Deadline for a single event publish.
    #[serde(default = "default_publish_timeout")]
    pub publish_timeout_seconds: u64,
    /// Deadline for downloading a document by URL.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            storage_timeout_seconds: default_storage_timeout(),
            publish_timeout_seconds: default_publish_timeout(),
            fetch_timeout_seconds: default_fetch_timeout(),
        }
    }
}

impl LimitsConfig {
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_timeout_seconds)
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(self.publish_timeout_seconds)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_storage_timeout() -> u64 {
    30
}

fn default_publish_timeout() -> u64 {
    10
}

fn default_fetch_timeout() -> u64 {
    30
}
