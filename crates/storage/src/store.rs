use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;
use crate::types::{PutObject, StoredObject};

/// Pluggable object storage backend.
///
/// Implementations are created once at startup and shared across requests,
/// so they must be safe to call concurrently and must not rely on
/// per-request mutation of their own state.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short backend name used in logs and health output.
    fn name(&self) -> &str;

    /// Write an object, replacing any existing object under the same key.
    ///
    /// Success means the object is committed and readable. A write that was
    /// accepted but could not be committed is reported as
    /// [`StorageError::Commit`]; callers must treat it as a failed upload.
    /// Implementations make a single attempt and never retry.
    async fn put(&self, object: PutObject) -> Result<StoredObject, StorageError>;

    /// Read an object back. Returns `None` if no object exists at the key.
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, StorageError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), StorageError>;
}
