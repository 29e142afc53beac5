use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::error::StorageError;
use crate::store::ObjectStore;
use crate::types::{PutObject, StoredObject};

/// In-memory object store using `DashMap`. Suitable for development and testing.
///
/// Objects are keyed by `(bucket, key)`. Writes overwrite, mirroring S3.
pub struct MemoryObjectStore {
    objects: DashMap<(String, String), (StoredObject, Bytes)>,
}

impl MemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: DashMap::new(),
        }
    }

    /// Number of objects across all buckets.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Metadata for an object, if present.
    pub fn metadata(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .map(|entry| entry.value().0.clone())
    }

    /// All keys stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .iter()
            .filter(|entry| entry.key().0 == bucket)
            .map(|entry| entry.key().1.clone())
            .collect();
        keys.sort();
        keys
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "memory"
    }

    async fn put(&self, object: PutObject) -> Result<StoredObject, StorageError> {
        let stored = StoredObject::committed(&object);
        self.objects
            .insert((object.bucket, object.key), (stored.clone(), object.data));
        Ok(stored)
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, StorageError> {
        Ok(self
            .objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .map(|entry| entry.value().1.clone()))
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(key: &str, body: &'static [u8]) -> PutObject {
        PutObject::new("docs", key, "application/pdf", Bytes::from_static(body))
    }

    #[tokio::test]
    async fn put_then_get_returns_same_bytes() {
        let store = MemoryObjectStore::new();
        let stored = store.put(put("uploads/a/file.pdf", b"%PDF")).await.unwrap();

        assert_eq!(stored.size_bytes, 4);
        assert_eq!(stored.content_type, "application/pdf");
        let body = store.get("docs", "uploads/a/file.pdf").await.unwrap();
        assert_eq!(body.as_deref(), Some(&b"%PDF"[..]));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = MemoryObjectStore::new();
        assert!(store.get("docs", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing_key() {
        let store = MemoryObjectStore::new();
        store.put(put("k", b"first")).await.unwrap();
        store.put(put("k", b"second")).await.unwrap();

        assert_eq!(store.len(), 1);
        let body = store.get("docs", "k").await.unwrap().unwrap();
        assert_eq!(&body[..], b"second");
    }

    #[tokio::test]
    async fn buckets_are_isolated() {
        let store = MemoryObjectStore::new();
        store.put(put("k", b"x")).await.unwrap();

        assert!(store.get("other", "k").await.unwrap().is_none());
        assert_eq!(store.keys("docs"), vec!["k".to_owned()]);
        assert!(store.keys("other").is_empty());
    }

    #[tokio::test]
    async fn metadata_lookup() {
        let store = MemoryObjectStore::new();
        assert!(store.is_empty());
        store.put(put("k", b"abc")).await.unwrap();

        let meta = store.metadata("docs", "k").unwrap();
        assert_eq!(meta.bucket, "docs");
        assert_eq!(meta.size_bytes, 3);
        assert!(store.health_check().await.is_ok());
    }
}
