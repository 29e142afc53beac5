use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::PublishError;

/// A message ready to be handed to the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRecord {
    /// Destination topic.
    pub topic: String,
    /// Partition key. Records with equal keys land on the same partition and
    /// keep their relative order.
    pub key: Bytes,
    /// Serialized payload.
    pub payload: Bytes,
}

impl OutboundRecord {
    /// Create a record.
    pub fn new(topic: impl Into<String>, key: impl Into<Bytes>, payload: impl Into<Bytes>) -> Self {
        Self {
            topic: topic.into(),
            key: key.into(),
            payload: payload.into(),
        }
    }
}

/// Broker acknowledgement for a published record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Topic the record was written to.
    pub topic: String,
    /// Partition assigned by the broker.
    pub partition: i32,
    /// Offset within the partition.
    pub offset: i64,
}

/// Pluggable event publisher.
///
/// One instance is shared by all requests for the lifetime of the process.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Short backend name used in logs and health output.
    fn name(&self) -> &str;

    /// Publish a record and wait for the broker acknowledgement.
    ///
    /// A single attempt is made; failures are returned, never retried.
    async fn publish(&self, record: OutboundRecord) -> Result<Delivery, PublishError>;

    /// Verify the broker is reachable.
    async fn health_check(&self) -> Result<(), PublishError>;
}
