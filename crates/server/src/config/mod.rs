mod broker;
mod limits;
mod server;
mod storage;
mod telemetry;

#[cfg(test)]
mod tests;

pub use broker::*;
pub use limits::*;
pub use server::*;
pub use storage::*;
pub use telemetry::*;

use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the ingestion server, loaded from a TOML file.
///
/// Every section is optional. Environment variables are applied on top of the
/// file with [`IngestConfig::apply_env_overrides`].
#[derive(Debug, Default, Deserialize)]
pub struct IngestConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Event broker configuration.
    #[serde(default)]
    pub broker: BrokerConfig,
    /// Upload size limit and external call deadlines.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// OpenTelemetry distributed tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl IngestConfig {
    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Recognized variables: `INGEST_BUCKET` (or `BUCKET_NAME`), `S3_ENDPOINT`,
    /// `AWS_REGION`, `KAFKA_BROKER`, `KAFKA_USER`, `KAFKA_PASS` and `PORT`.
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(bucket) = var("INGEST_BUCKET").or_else(|| var("BUCKET_NAME")) {
            self.storage.s3.bucket = Some(bucket);
        }
        if let Some(endpoint) = var("S3_ENDPOINT") {
            self.storage.s3.aws.endpoint_url = Some(endpoint);
        }
        if let Some(region) = var("AWS_REGION") {
            self.storage.s3.aws.region = region;
        }
        if let Some(brokers) = var("KAFKA_BROKER") {
            self.broker.kafka.bootstrap_servers = brokers;
        }
        if let Some(user) = var("KAFKA_USER") {
            self.broker.kafka.username = Some(user);
        }
        if let Some(pass) = var("KAFKA_PASS") {
            self.broker.kafka.password = Some(pass);
        }
        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| ServerError::Config(format!("invalid PORT {port:?}: {e}")))?;
        }

        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<(), ServerError> {
        self.apply_env_overrides(|name| std::env::var(name).ok())
    }

    /// Check the settings that must be present before startup.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.storage.bucket().is_none() {
            return Err(ServerError::Config(
                "storage bucket is required (set [storage].bucket or INGEST_BUCKET)".into(),
            ));
        }
        if self.limits.max_upload_bytes == 0 {
            return Err(ServerError::Config(
                "limits.max_upload_bytes must be greater than zero".into(),
            ));
        }
        match self.storage.backend.as_str() {
            "s3" | "memory" => {}
            other => {
                return Err(ServerError::Config(format!(
                    "unknown storage backend: {other}"
                )));
            }
        }
        match self.broker.backend.as_str() {
            "kafka" | "memory" => {}
            other => {
                return Err(ServerError::Config(format!(
                    "unknown broker backend: {other}"
                )));
            }
        }
        Ok(())
    }
}
