use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;

/// Broker topic every ingestion event is published to.
pub const INGESTION_TOPIC: &str = "document.ingestion";

/// Fact record announcing that a document was stored and is ready for
/// downstream processing.
///
/// Field names on the wire are camelCase and are consumed by services outside
/// this repository, so they must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct IngestionEvent {
    /// Hex SHA-256 of the stored bytes.
    pub file_hash: String,
    /// Object key the bytes were written under.
    pub s3_key: String,
    /// File name as supplied by the client. Untrusted.
    pub original_name: String,
    /// Best-effort user identifier (see [`crate::identity`]).
    pub user_id: String,
    /// Publish time in epoch milliseconds.
    pub timestamp: i64,
    /// Size of the stored document in bytes.
    pub file_size: u64,
    /// Language hint for downstream processing.
    pub preferred_language: String,
}

impl IngestionEvent {
    /// Build an event stamped with the current time.
    #[must_use]
    pub fn new(
        digest: &ContentDigest,
        storage_key: impl Into<String>,
        original_name: impl Into<String>,
        user_id: impl Into<String>,
        file_size: u64,
        preferred_language: impl Into<String>,
    ) -> Self {
        Self {
            file_hash: digest.to_string(),
            s3_key: storage_key.into(),
            original_name: original_name.into(),
            user_id: user_id.into(),
            timestamp: Utc::now().timestamp_millis(),
            file_size,
            preferred_language: preferred_language.into(),
        }
    }

    /// Serialize to the JSON payload sent to the broker.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Partition key for this event: the content hash bytes.
    #[must_use]
    pub fn partition_key(&self) -> &[u8] {
        self.file_hash.as_bytes()
    }
}
