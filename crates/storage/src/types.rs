use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single object write.
#[derive(Debug, Clone)]
pub struct PutObject {
    /// Target bucket.
    pub bucket: String,
    /// Object key within the bucket.
    pub key: String,
    /// MIME type stored alongside the object.
    pub content_type: String,
    /// Object body.
    pub data: Bytes,
}

impl PutObject {
    /// Create a write request.
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Metadata for an object that was written and committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Bucket the object lives in.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// When the write was committed.
    pub stored_at: DateTime<Utc>,
}

impl StoredObject {
    /// Metadata for a just-committed write.
    pub fn committed(put: &PutObject) -> Self {
        Self {
            bucket: put.bucket.clone(),
            key: put.key.clone(),
            content_type: put.content_type.clone(),
            size_bytes: put.data.len() as u64,
            stored_at: Utc::now(),
        }
    }
}
