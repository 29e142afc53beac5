use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn empty_file_uses_defaults() {
    let config: IngestConfig = toml::from_str("").unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.storage.backend, "s3");
    assert_eq!(config.storage.s3.aws.region, "us-east-1");
    assert!(config.storage.bucket().is_none());
    assert_eq!(config.broker.backend, "kafka");
    assert_eq!(config.broker.kafka.bootstrap_servers, "localhost:9092");
    assert_eq!(config.limits.max_upload_bytes, 10 * 1024 * 1024);
    assert_eq!(config.limits.storage_timeout_seconds, 30);
    assert_eq!(config.limits.publish_timeout_seconds, 10);
    assert_eq!(config.limits.fetch_timeout_seconds, 30);
    assert!(!config.telemetry.enabled);
}

#[test]
fn full_file_parses() {
    let toml = r#"
        [server]
        host = "127.0.0.1"
        port = 9000

        [storage]
        backend = "s3"
        bucket = "documents"
        region = "eu-west-1"
        endpoint_url = "http://minio:9000"
        force_path_style = true

        [broker]
        backend = "kafka"
        bootstrap_servers = "kafka-1:9092"
        username = "key"
        password = "secret"

        [limits]
        max_upload_bytes = 1048576
        publish_timeout_seconds = 5
    "#;

    let config: IngestConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.storage.bucket(), Some("documents"));
    assert_eq!(config.storage.s3.aws.region, "eu-west-1");
    assert_eq!(
        config.storage.s3.aws.endpoint_url.as_deref(),
        Some("http://minio:9000")
    );
    assert!(config.storage.s3.force_path_style);
    assert!(config.broker.kafka.uses_sasl());
    assert_eq!(config.limits.max_upload_bytes, 1_048_576);
    assert_eq!(config.limits.publish_timeout_seconds, 5);
    assert_eq!(config.limits.storage_timeout_seconds, 30);
    config.validate().unwrap();
}

#[test]
fn env_overrides_file_values() {
    let mut config: IngestConfig = toml::from_str(
        r#"
        [storage]
        bucket = "from-file"
        "#,
    )
    .unwrap();

    config
        .apply_env_overrides(env(&[
            ("INGEST_BUCKET", "from-env"),
            ("S3_ENDPOINT", "http://localhost:9000"),
            ("AWS_REGION", "ap-south-1"),
            ("KAFKA_BROKER", "broker:29092"),
            ("KAFKA_USER", "user"),
            ("KAFKA_PASS", "pass"),
            ("PORT", "8181"),
        ]))
        .unwrap();

    assert_eq!(config.storage.bucket(), Some("from-env"));
    assert_eq!(
        config.storage.s3.aws.endpoint_url.as_deref(),
        Some("http://localhost:9000")
    );
    assert_eq!(config.storage.s3.aws.region, "ap-south-1");
    assert_eq!(config.broker.kafka.bootstrap_servers, "broker:29092");
    assert!(config.broker.kafka.uses_sasl());
    assert_eq!(config.server.port, 8181);
}

#[test]
fn bucket_name_is_a_fallback_variable() {
    let mut config = IngestConfig::default();
    config
        .apply_env_overrides(env(&[("BUCKET_NAME", "legacy")]))
        .unwrap();
    assert_eq!(config.storage.bucket(), Some("legacy"));

    config
        .apply_env_overrides(env(&[("BUCKET_NAME", "legacy"), ("INGEST_BUCKET", "new")]))
        .unwrap();
    assert_eq!(config.storage.bucket(), Some("new"));
}

#[test]
fn empty_env_values_are_ignored() {
    let mut config = IngestConfig::default();
    config
        .apply_env_overrides(env(&[("INGEST_BUCKET", ""), ("PORT", " ")]))
        .unwrap();
    assert!(config.storage.bucket().is_none());
    assert_eq!(config.server.port, 8080);
}

#[test]
fn invalid_port_is_rejected() {
    let mut config = IngestConfig::default();
    let err = config
        .apply_env_overrides(env(&[("PORT", "eighty")]))
        .unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn validate_requires_bucket() {
    let config = IngestConfig::default();
    assert!(matches!(config.validate(), Err(ServerError::Config(_))));

    let config: IngestConfig = toml::from_str(
        r#"
        [storage]
        bucket = "   "
        "#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_unknown_backends() {
    let config: IngestConfig = toml::from_str(
        r#"
        [storage]
        backend = "gcs"
        bucket = "docs"
        "#,
    )
    .unwrap();
    assert!(config.validate().is_err());

    let config: IngestConfig = toml::from_str(
        r#"
        [storage]
        bucket = "docs"

        [broker]
        backend = "rabbitmq"
        "#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn debug_redacts_broker_password() {
    let mut config = IngestConfig::default();
    config
        .apply_env_overrides(env(&[("KAFKA_USER", "user"), ("KAFKA_PASS", "hunter2")]))
        .unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("hunter2"));
}

#[test]
fn telemetry_defaults() {
    let config: TelemetryConfig = toml::from_str("").unwrap();
    assert!(!config.enabled);
    assert_eq!(config.endpoint, "http://localhost:4317");
    assert_eq!(config.service_name, "ingest-gateway");
    assert!((config.sample_ratio - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.protocol, OtlpProtocol::Grpc);
    assert_eq!(config.export_timeout_seconds, 10);
}

#[test]
fn telemetry_section_parses() {
    let config: IngestConfig = toml::from_str(
        r#"
        [telemetry]
        enabled = true
        endpoint = "http://collector:4318"
        sample_ratio = 0.25
        protocol = "http"
        "#,
    )
    .unwrap();

    assert!(config.telemetry.enabled);
    assert_eq!(config.telemetry.endpoint, "http://collector:4318");
    assert!((config.telemetry.sample_ratio - 0.25).abs() < f64::EPSILON);
    assert_eq!(config.telemetry.protocol, OtlpProtocol::Http);
    assert_eq!(config.telemetry.service_name, "ingest-gateway");
}

#[test]
fn unknown_telemetry_protocol_is_rejected() {
    let result: Result<TelemetryConfig, _> = toml::from_str(r#"protocol = "udp""#);
    assert!(result.is_err());
}
