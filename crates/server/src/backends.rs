use std::sync::Arc;

use ingest_publisher::{EventPublisher, MemoryPublisher};
use ingest_storage::{MemoryObjectStore, ObjectStore};
#[cfg(feature = "kafka")]
use ingest_publisher::KafkaPublisher;
#[cfg(feature = "s3")]
use ingest_storage::S3ObjectStore;

use crate::config::{BrokerConfig, StorageConfig};
use crate::error::ServerError;

/// Create the object store selected by `[storage] backend`.
#[allow(clippy::unused_async)]
pub async fn create_object_store(
    config: &StorageConfig,
) -> Result<Arc<dyn ObjectStore>, ServerError> {
    let store: Arc<dyn ObjectStore> = match config.backend.as_str() {
        "memory" => {
            tracing::warn!("using in-memory object store; documents are lost on restart");
            Arc::new(MemoryObjectStore::new())
        }
        #[cfg(feature = "s3")]
        "s3" => Arc::new(S3ObjectStore::new(config.s3.clone()).await),
        other => {
            return Err(ServerError::Config(format!(
                "unsupported storage backend: {other} (is the feature enabled?)"
            )));
        }
    };

    Ok(store)
}

/// Create the event publisher selected by `[broker] backend`.
pub fn create_publisher(config: &BrokerConfig) -> Result<Arc<dyn EventPublisher>, ServerError> {
    let publisher: Arc<dyn EventPublisher> = match config.backend.as_str() {
        "memory" => {
            tracing::warn!("using in-memory publisher; events are not delivered anywhere");
            Arc::new(MemoryPublisher::new())
        }
        #[cfg(feature = "kafka")]
        "kafka" => Arc::new(
            KafkaPublisher::new(config.kafka.clone())
                .map_err(|e| ServerError::Config(format!("kafka producer: {e}")))?,
        ),
        other => {
            return Err(ServerError::Config(format!(
                "unsupported broker backend: {other} (is the feature enabled?)"
            )));
        }
    };

    Ok(publisher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backends() {
        let storage: StorageConfig = toml::from_str(r#"backend = "memory""#).unwrap();
        let broker: BrokerConfig = toml::from_str(r#"backend = "memory""#).unwrap();

        let store = create_object_store(&storage).await.unwrap();
        let publisher = create_publisher(&broker).unwrap();

        assert_eq!(store.name(), "memory");
        assert_eq!(publisher.name(), "memory");
    }

    #[tokio::test]
    async fn unknown_backends_are_config_errors() {
        let storage: StorageConfig = toml::from_str(r#"backend = "gcs""#).unwrap();
        let broker: BrokerConfig = toml::from_str(r#"backend = "nats""#).unwrap();

        assert!(matches!(
            create_object_store(&storage).await,
            Err(ServerError::Config(_))
        ));
        assert!(matches!(
            create_publisher(&broker),
            Err(ServerError::Config(_))
        ));
    }
}
