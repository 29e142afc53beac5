use serde::Deserialize;

/// OTLP transport used to ship spans to the collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtlpProtocol {
    /// OTLP over gRPC, usually port 4317.
    #[default]
    Grpc,
    /// OTLP over HTTP/protobuf, usually port 4318.
    Http,
}

/// `[telemetry]` section.
///
/// Logging to stdout is always on. This section only controls whether the
/// request and ingestion spans are also exported over OTLP.
///
/// ```toml
/// [telemetry]
/// enabled = true
/// endpoint = "http://otel-collector:4317"
/// sample_ratio = 0.1
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    /// Collector endpoint.
    pub endpoint: String,
    /// `service.name` resource attribute.
    pub service_name: String,
    /// Fraction of traces kept, clamped to `0.0..=1.0`.
    pub sample_ratio: f64,
    pub protocol: OtlpProtocol,
    /// Deadline for a single span export batch.
    pub export_timeout_seconds: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:4317".to_owned(),
            service_name: "ingest-gateway".to_owned(),
            sample_ratio: 1.0,
            protocol: OtlpProtocol::Grpc,
            export_timeout_seconds: 10,
        }
    }
}
