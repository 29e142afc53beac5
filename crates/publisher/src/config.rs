use serde::{Deserialize, Serialize};

/// Kafka producer settings.
///
/// When both `username` and `password` are set the producer authenticates
/// with SASL `PLAIN` over TLS (`SASL_SSL`), which is what managed Kafka
/// offerings expect. Without credentials it connects in plaintext.
#[derive(Clone, Serialize, Deserialize)]
pub struct KafkaConfig {
    /// Comma-separated `host:port` bootstrap servers.
    #[serde(default = "default_bootstrap_servers")]
    pub bootstrap_servers: String,

    /// SASL username.
    #[serde(default)]
    pub username: Option<String>,

    /// SASL password.
    #[serde(default)]
    pub password: Option<String>,

    /// Client id reported to the broker.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Upper bound for the producer to deliver a message, in milliseconds.
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,
}

impl std::fmt::Debug for KafkaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaConfig")
            .field("bootstrap_servers", &self.bootstrap_servers)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .field("message_timeout_ms", &self.message_timeout_ms)
            .finish()
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: default_bootstrap_servers(),
            username: None,
            password: None,
            client_id: default_client_id(),
            message_timeout_ms: default_message_timeout_ms(),
        }
    }
}

impl KafkaConfig {
    /// Create a config for the given bootstrap servers.
    pub fn new(bootstrap_servers: impl Into<String>) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.into(),
            ..Self::default()
        }
    }

    /// Set SASL credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Whether SASL authentication is configured.
    pub fn uses_sasl(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// librdkafka properties for a producer with these settings.
    pub fn client_properties(&self) -> Vec<(&'static str, String)> {
        let mut props = vec![
            ("bootstrap.servers", self.bootstrap_servers.clone()),
            ("client.id", self.client_id.clone()),
            ("message.timeout.ms", self.message_timeout_ms.to_string()),
        ];

        if let (Some(user), Some(pass)) = (&self.username, &self.password) {
            props.push(("security.protocol", "SASL_SSL".to_owned()));
            props.push(("sasl.mechanisms", "PLAIN".to_owned()));
            props.push(("sasl.username", user.clone()));
            props.push(("sasl.password", pass.clone()));
        }

        props
    }
}

fn default_bootstrap_servers() -> String {
    "localhost:9092".to_owned()
}

fn default_client_id() -> String {
    "ingest-gateway".to_owned()
}

fn default_message_timeout_ms() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop<'a>(props: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        props
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn plaintext_without_credentials() {
        let config = KafkaConfig::new("broker-1:9092,broker-2:9092");
        let props = config.client_properties();

        assert!(!config.uses_sasl());
        assert_eq!(
            prop(&props, "bootstrap.servers"),
            Some("broker-1:9092,broker-2:9092")
        );
        assert_eq!(prop(&props, "message.timeout.ms"), Some("10000"));
        assert!(prop(&props, "security.protocol").is_none());
    }

    #[test]
    fn sasl_ssl_with_credentials() {
        let config = KafkaConfig::new("pkc.example.cloud:9092").with_credentials("key", "secret");
        let props = config.client_properties();

        assert!(config.uses_sasl());
        assert_eq!(prop(&props, "security.protocol"), Some("SASL_SSL"));
        assert_eq!(prop(&props, "sasl.mechanisms"), Some("PLAIN"));
        assert_eq!(prop(&props, "sasl.username"), Some("key"));
        assert_eq!(prop(&props, "sasl.password"), Some("secret"));
    }

    #[test]
    fn username_alone_does_not_enable_sasl() {
        let mut config = KafkaConfig::default();
        config.username = Some("key".into());
        assert!(!config.uses_sasl());
    }

    #[test]
    fn debug_redacts_password() {
        let config = KafkaConfig::default().with_credentials("key", "hunter2");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: KafkaConfig =
            serde_json::from_value(serde_json::json!({"bootstrap_servers": "k:9092"})).unwrap();
        assert_eq!(config.bootstrap_servers, "k:9092");
        assert_eq!(config.client_id, "ingest-gateway");
        assert!(config.username.is_none());
    }
}
