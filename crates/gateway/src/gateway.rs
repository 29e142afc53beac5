use std::sync::Arc;
use std::time::Duration;

use ingest_core::{ContentDigest, DEFAULT_CONTENT_TYPE, IngestionEvent};
use ingest_publisher::{EventPublisher, OutboundRecord, PublishError};
use ingest_storage::{ObjectStore, PutObject, StorageError};
use tracing::{debug, info, instrument, warn};

use crate::error::IngestError;
use crate::metrics::IngestMetrics;
use crate::stage::IngestStage;
use crate::types::{IngestReceipt, Upload};

/// The ingestion pipeline: hash, store, publish.
///
/// Holds the long-lived storage and broker handles. It is immutable after
/// construction and shared by every request; the only mutable state is the
/// atomic metrics.
///
/// Storage and publishing are two independent effects with no shared
/// transaction. If publishing fails after the object was stored, the object
/// stays in the bucket and the request still fails.
pub struct IngestionGateway {
    pub(crate) store: Arc<dyn ObjectStore>,
    pub(crate) publisher: Arc<dyn EventPublisher>,
    pub(crate) bucket: String,
    pub(crate) topic: String,
    pub(crate) storage_timeout: Duration,
    pub(crate) publish_timeout: Duration,
    pub(crate) metrics: Arc<IngestMetrics>,
}

impl std::fmt::Debug for IngestionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionGateway")
            .field("store", &self.store.name())
            .field("publisher", &self.publisher.name())
            .field("bucket", &self.bucket)
            .field("topic", &self.topic)
            .field("storage_timeout", &self.storage_timeout)
            .field("publish_timeout", &self.publish_timeout)
            .finish_non_exhaustive()
    }
}

impl IngestionGateway {
    /// Bucket documents are written to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Topic events are published to.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Shared metrics handle.
    pub fn metrics(&self) -> &Arc<IngestMetrics> {
        &self.metrics
    }

    /// Name of the configured object store backend.
    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Name of the configured publisher backend.
    pub fn publisher_name(&self) -> &str {
        self.publisher.name()
    }

    /// Count a request that was rejected before it reached [`ingest`](Self::ingest).
    pub fn record_rejected(&self, error: &IngestError) {
        self.metrics.increment_received();
        self.metrics.increment_rejected();
        warn!(stage = %error.stage(), error = %error, "ingestion request rejected");
    }

    /// Run a fully received upload through hashing, storage and publishing.
    ///
    /// Returns the receipt on success. On failure nothing is retried and no
    /// compensating action is taken.
    #[instrument(
        name = "gateway.ingest",
        skip(self, upload),
        fields(
            file_name = %upload.file_name,
            size = upload.data.len(),
            user_id = %upload.user_id,
        )
    )]
    pub async fn ingest(&self, upload: Upload) -> Result<IngestReceipt, IngestError> {
        self.metrics.increment_received();

        let result = self.run(upload).await;

        match &result {
            Ok(receipt) => {
                self.metrics.record_accepted(receipt.stored.size_bytes);
                debug!(stage = %IngestStage::Responding, "ingestion complete");
            }
            Err(e) => {
                match e {
                    IngestError::Storage(_) => self.metrics.increment_storage_failures(),
                    IngestError::Encode(_) | IngestError::Publish(_) => {
                        self.metrics.increment_publish_failures();
                    }
                    _ => self.metrics.increment_rejected(),
                }
                warn!(
                    stage = %IngestStage::Failed,
                    failed_during = %e.stage(),
                    error = %e,
                    "ingestion failed"
                );
            }
        }

        result
    }

    async fn run(&self, upload: Upload) -> Result<IngestReceipt, IngestError> {
        let Upload {
            file_name,
            display_name,
            content_type,
            data,
            user_id,
            language,
        } = upload;

        debug!(stage = %IngestStage::Hashing, "computing digest");
        let size = data.len() as u64;
        let digest = ContentDigest::compute(&data);
        let key = digest.storage_key(&file_name);

        debug!(stage = %IngestStage::Uploading, key = %key, "writing object");
        let content_type = content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned());
        let put = PutObject::new(self.bucket.clone(), key.clone(), content_type, data);
        let stored = tokio::time::timeout(self.storage_timeout, self.store.put(put))
            .await
            .map_err(|_| StorageError::Timeout)??;
        info!(bucket = %self.bucket, key = %key, size, "document stored");

        debug!(stage = %IngestStage::Publishing, "publishing event");
        let event = IngestionEvent::new(
            &digest,
            key,
            display_name.unwrap_or(file_name),
            user_id,
            size,
            language,
        );
        let payload = event.to_payload()?;
        let record = OutboundRecord::new(
            self.topic.clone(),
            event.partition_key().to_vec(),
            payload,
        );
        let delivery = tokio::time::timeout(self.publish_timeout, self.publisher.publish(record))
            .await
            .map_err(|_| PublishError::Timeout)??;
        info!(
            digest = %digest,
            topic = %delivery.topic,
            partition = delivery.partition,
            offset = delivery.offset,
            "ingestion event published"
        );

        Ok(IngestReceipt {
            digest,
            stored,
            event,
            delivery,
        })
    }
}
