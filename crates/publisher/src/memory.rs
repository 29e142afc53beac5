use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::PublishError;
use crate::publisher::{Delivery, EventPublisher, OutboundRecord};

/// In-memory publisher that keeps every record in publish order.
///
/// Records are assigned to one of `partitions` partitions by key, so tests
/// can observe that equal keys share a partition. Suitable for development
/// and testing.
pub struct MemoryPublisher {
    partitions: u32,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    records: Vec<(Delivery, OutboundRecord)>,
    next_offsets: HashMap<(String, i32), i64>,
}

impl MemoryPublisher {
    /// Create a publisher with a single partition per topic.
    pub fn new() -> Self {
        Self::with_partitions(1)
    }

    /// Create a publisher with `partitions` partitions per topic.
    pub fn with_partitions(partitions: u32) -> Self {
        Self {
            partitions: partitions.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// All published records, oldest first.
    pub fn records(&self) -> Vec<OutboundRecord> {
        self.inner
            .lock()
            .records
            .iter()
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// All deliveries, oldest first.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.inner
            .lock()
            .records
            .iter()
            .map(|(delivery, _)| delivery.clone())
            .collect()
    }

    /// Number of published records.
    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    /// Whether nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }

    fn partition_for(&self, key: &[u8]) -> i32 {
        // FNV-1a; only needs to be stable, not well distributed.
        let hash = key.iter().fold(0x811c_9dc5_u32, |acc, b| {
            (acc ^ u32::from(*b)).wrapping_mul(0x0100_0193)
        });
        i32::try_from(hash % self.partitions).unwrap_or(0)
    }
}

impl Default for MemoryPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "memory"
    }

    async fn publish(&self, record: OutboundRecord) -> Result<Delivery, PublishError> {
        let partition = self.partition_for(&record.key);
        let mut inner = self.inner.lock();
        let next = inner
            .next_offsets
            .entry((record.topic.clone(), partition))
            .or_insert(0);
        let delivery = Delivery {
            topic: record.topic.clone(),
            partition,
            offset: *next,
        };
        *next += 1;
        inner.records.push((delivery.clone(), record));
        Ok(delivery)
    }

    async fn health_check(&self) -> Result<(), PublishError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &'static str, payload: &'static str) -> OutboundRecord {
        OutboundRecord::new("document.ingestion", key.as_bytes(), payload.as_bytes())
    }

    #[tokio::test]
    async fn records_are_kept_in_order() {
        let publisher = MemoryPublisher::new();
        publisher.publish(record("a", "1")).await.unwrap();
        publisher.publish(record("b", "2")).await.unwrap();

        let records = publisher.records();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0].payload[..], b"1");
        assert_eq!(&records[1].payload[..], b"2");
    }

    #[tokio::test]
    async fn offsets_increase_per_partition() {
        let publisher = MemoryPublisher::new();
        let first = publisher.publish(record("a", "1")).await.unwrap();
        let second = publisher.publish(record("b", "2")).await.unwrap();

        assert_eq!(first.partition, 0);
        assert_eq!(first.offset, 0);
        assert_eq!(second.offset, 1);
    }

    #[tokio::test]
    async fn equal_keys_share_a_partition() {
        let publisher = MemoryPublisher::with_partitions(8);
        let a = publisher.publish(record("deadbeef", "1")).await.unwrap();
        let b = publisher.publish(record("deadbeef", "2")).await.unwrap();

        assert_eq!(a.partition, b.partition);
        assert!(b.offset > a.offset);
        assert!((0..8).contains(&a.partition));
    }

    #[tokio::test]
    async fn empty_until_published() {
        let publisher = MemoryPublisher::default();
        assert!(publisher.is_empty());
        assert!(publisher.health_check().await.is_ok());
        publisher.publish(record("k", "v")).await.unwrap();
        assert_eq!(publisher.len(), 1);
        assert_eq!(publisher.deliveries()[0].topic, "document.ingestion");
    }
}
