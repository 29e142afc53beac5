use ingest_publisher::KafkaConfig;
use serde::Deserialize;

/// Event broker configuration.
///
/// # Example
///
/// ```toml
/// [broker]
/// backend = "kafka"
/// bootstrap_servers = "pkc-1234.us-east-1.aws.confluent.cloud:9092"
/// username = "API_KEY"
/// password = "API_SECRET"
/// ```
#[derive(Debug, Deserialize)]
pub struct BrokerConfig {
    /// Backend type: `"kafka"` or `"memory"`.
    #[serde(default = "default_broker_backend")]
    pub backend: String,

    /// Kafka producer settings.
    #[serde(flatten)]
    pub kafka: KafkaConfig,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            backend: default_broker_backend(),
            kafka: KafkaConfig::default(),
        }
    }
}

fn default_broker_backend() -> String {
    "kafka".to_owned()
}
