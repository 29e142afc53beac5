use std::time::Duration;

use async_trait::async_trait;
use rdkafka::ClientConfig;
use rdkafka::error::KafkaError;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use tracing::{debug, error, info, instrument};

use crate::config::KafkaConfig;
use crate::error::PublishError;
use crate::publisher::{Delivery, EventPublisher, OutboundRecord};

/// Kafka publisher backed by a librdkafka `FutureProducer`.
///
/// The producer owns its connection pool and is cheap to share; one instance
/// serves every request.
pub struct KafkaPublisher {
    config: KafkaConfig,
    producer: FutureProducer,
}

impl std::fmt::Debug for KafkaPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaPublisher")
            .field("config", &self.config)
            .field("producer", &"<FutureProducer>")
            .finish()
    }
}

impl KafkaPublisher {
    /// Create the producer. Fails if librdkafka rejects the configuration.
    pub fn new(config: KafkaConfig) -> Result<Self, PublishError> {
        let mut client = ClientConfig::new();
        for (key, value) in config.client_properties() {
            client.set(key, value);
        }

        let producer: FutureProducer = client
            .create()
            .map_err(|e| PublishError::Configuration(format!("failed to create producer: {e}")))?;

        info!(
            bootstrap_servers = %config.bootstrap_servers,
            sasl = config.uses_sasl(),
            "Kafka producer created"
        );

        Ok(Self { config, producer })
    }

    fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.config.message_timeout_ms)
    }
}

#[async_trait]
impl EventPublisher for KafkaPublisher {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "kafka"
    }

    #[instrument(skip(self, record), fields(topic = %record.topic, payload_size = record.payload.len()))]
    async fn publish(&self, record: OutboundRecord) -> Result<Delivery, PublishError> {
        let future_record = FutureRecord::to(&record.topic)
            .key(&record.key[..])
            .payload(&record.payload[..]);

        debug!("producing record");

        let (partition, offset) = self
            .producer
            .send(future_record, Timeout::After(self.send_timeout()))
            .await
            .map_err(|(e, _message)| {
                error!(error = %e, "Kafka produce failed");
                classify_kafka_error(&e)
            })?;

        info!(partition, offset, "Kafka record acknowledged");

        Ok(Delivery {
            topic: record.topic,
            partition,
            offset,
        })
    }

    async fn health_check(&self) -> Result<(), PublishError> {
        let producer = self.producer.clone();
        let timeout = self.send_timeout();
        // Metadata fetch is a blocking librdkafka call.
        tokio::task::spawn_blocking(move || {
            producer
                .client()
                .fetch_metadata(None, Timeout::After(timeout))
                .map(|_| ())
        })
        .await
        .map_err(|e| PublishError::Broker(format!("health check task failed: {e}")))?
        .map_err(|e| PublishError::Broker(format!("Kafka health check failed: {e}")))
    }
}

fn classify_kafka_error(err: &KafkaError) -> PublishError {
    let text = err.to_string();
    if text.to_lowercase().contains("timed out") {
        PublishError::Timeout
    } else {
        PublishError::Broker(text)
    }
}
