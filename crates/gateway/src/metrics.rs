use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters tracking ingestion outcomes.
///
/// All counters use relaxed ordering. For a consistent point-in-time view,
/// call [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct IngestMetrics {
    /// Requests that reached the pipeline.
    pub received: AtomicU64,
    /// Requests that stored and published successfully.
    pub accepted: AtomicU64,
    /// Requests rejected before storage (validation, read, fetch, size).
    pub rejected: AtomicU64,
    /// Requests that failed while writing to object storage.
    pub storage_failures: AtomicU64,
    /// Requests that failed while publishing the event.
    pub publish_failures: AtomicU64,
    /// Total bytes of accepted documents.
    pub bytes_ingested: AtomicU64,
}

impl IngestMetrics {
    /// Increment the received counter.
    pub fn increment_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an accepted document of `bytes` bytes.
    pub fn record_accepted(&self, bytes: u64) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        self.bytes_ingested.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Increment the rejected counter.
    pub fn increment_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the storage failure counter.
    pub fn increment_storage_failures(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the publish failure counter.
    pub fn increment_publish_failures(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
            bytes_ingested: self.bytes_ingested.load(Ordering::Relaxed),
        }
    }
}

/// Plain-data copy of [`IngestMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub received: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub storage_failures: u64,
    pub publish_failures: u64,
    pub bytes_ingested: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_increments() {
        let metrics = IngestMetrics::default();
        metrics.increment_received();
        metrics.increment_received();
        metrics.record_accepted(512);
        metrics.increment_storage_failures();

        let snap = metrics.snapshot();
        assert_eq!(snap.received, 2);
        assert_eq!(snap.accepted, 1);
        assert_eq!(snap.bytes_ingested, 512);
        assert_eq!(snap.storage_failures, 1);
        assert_eq!(snap.publish_failures, 0);
        assert_eq!(snap.rejected, 0);
    }
}
