use bytes::Bytes;
use ingest_core::{ContentDigest, IngestionEvent};
use ingest_publisher::Delivery;
use ingest_storage::StoredObject;

/// A fully received document plus the request context needed to ingest it.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Name used as the last segment of the storage key.
    pub file_name: String,
    /// Name recorded as `originalName` when it differs from `file_name`.
    pub display_name: Option<String>,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    /// Entire document body.
    pub data: Bytes,
    /// Resolved (unverified) user id.
    pub user_id: String,
    /// Resolved preferred language.
    pub language: String,
}

impl Upload {
    /// Create an upload with no declared content type.
    pub fn new(
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
        user_id: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            display_name: None,
            content_type: None,
            data: data.into(),
            user_id: user_id.into(),
            language: language.into(),
        }
    }

    /// Record a different `originalName` than the storage file name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Everything that happened for a successful ingestion.
#[derive(Debug, Clone)]
pub struct IngestReceipt {
    /// Digest returned to the client.
    pub digest: ContentDigest,
    /// Committed object metadata.
    pub stored: StoredObject,
    /// Event that was published.
    pub event: IngestionEvent,
    /// Broker acknowledgement.
    pub delivery: Delivery,
}
