use std::sync::Arc;
use std::time::Duration;

use ingest_core::INGESTION_TOPIC;
use ingest_publisher::EventPublisher;
use ingest_storage::ObjectStore;

use crate::error::IngestError;
use crate::gateway::IngestionGateway;
use crate::metrics::IngestMetrics;

/// Fluent builder for constructing an [`IngestionGateway`].
///
/// An object store, a publisher and a bucket name are required. The topic
/// defaults to `document.ingestion`; timeouts default to 30 s for storage
/// and 10 s for publishing.
pub struct IngestionGatewayBuilder {
    store: Option<Arc<dyn ObjectStore>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    bucket: Option<String>,
    topic: String,
    storage_timeout: Duration,
    publish_timeout: Duration,
}

impl IngestionGatewayBuilder {
    /// Create a new builder with defaults for the optional fields.
    pub fn new() -> Self {
        Self {
            store: None,
            publisher: None,
            bucket: None,
            topic: INGESTION_TOPIC.to_owned(),
            storage_timeout: Duration::from_secs(30),
            publish_timeout: Duration::from_secs(10),
        }
    }

    /// Set the object store.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the event publisher.
    #[must_use]
    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Set the destination bucket.
    #[must_use]
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Override the destination topic.
    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Deadline for a single object-store write.
    #[must_use]
    pub fn storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Deadline for a single publish call.
    #[must_use]
    pub fn publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }

    /// Consume the builder and produce a configured [`IngestionGateway`].
    pub fn build(self) -> Result<IngestionGateway, IngestError> {
        let store = self
            .store
            .ok_or_else(|| IngestError::Configuration("object store is required".into()))?;

        let publisher = self
            .publisher
            .ok_or_else(|| IngestError::Configuration("event publisher is required".into()))?;

        let bucket = self
            .bucket
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| IngestError::Configuration("bucket name is required".into()))?;

        Ok(IngestionGateway {
            store,
            publisher,
            bucket,
            topic: self.topic,
            storage_timeout: self.storage_timeout,
            publish_timeout: self.publish_timeout,
            metrics: Arc::new(IngestMetrics::default()),
        })
    }
}

impl Default for IngestionGatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest_publisher::MemoryPublisher;
    use ingest_storage::MemoryObjectStore;

    #[test]
    fn build_requires_store() {
        let result = IngestionGatewayBuilder::new()
            .publisher(Arc::new(MemoryPublisher::new()))
            .bucket("docs")
            .build();
        assert!(matches!(result, Err(IngestError::Configuration(_))));
    }

    #[test]
    fn build_requires_publisher() {
        let result = IngestionGatewayBuilder::new()
            .store(Arc::new(MemoryObjectStore::new()))
            .bucket("docs")
            .build();
        assert!(matches!(result, Err(IngestError::Configuration(_))));
    }

    #[test]
    fn build_requires_non_blank_bucket() {
        let result = IngestionGatewayBuilder::new()
            .store(Arc::new(MemoryObjectStore::new()))
            .publisher(Arc::new(MemoryPublisher::new()))
            .bucket("  ")
            .build();
        assert!(matches!(result, Err(IngestError::Configuration(_))));
    }

    #[test]
    fn build_with_defaults() {
        let gateway = IngestionGatewayBuilder::new()
            .store(Arc::new(MemoryObjectStore::new()))
            .publisher(Arc::new(MemoryPublisher::new()))
            .bucket("docs")
            .build()
            .unwrap();
        assert_eq!(gateway.bucket(), "docs");
        assert_eq!(gateway.topic(), "document.ingestion");
    }
}
