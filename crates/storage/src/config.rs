use serde::{Deserialize, Serialize};

/// Shared AWS settings for S3-compatible storage.
///
/// Contains the region, an optional STS assume-role ARN for cross-account
/// access, and an endpoint URL override for local development (e.g. `MinIO`
/// or `LocalStack`).
#[derive(Clone, Serialize, Deserialize)]
pub struct AwsBaseConfig {
    /// AWS region (e.g. `"us-east-1"`).
    #[serde(default = "default_region")]
    pub region: String,

    /// Optional IAM role ARN to assume via STS.
    #[serde(default)]
    pub role_arn: Option<String>,

    /// Optional endpoint URL override.
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Optional STS session name (defaults to `"ingest-gateway"`).
    #[serde(default)]
    pub session_name: Option<String>,

    /// Optional external ID for cross-account trust policies.
    #[serde(default)]
    pub external_id: Option<String>,
}

impl std::fmt::Debug for AwsBaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsBaseConfig")
            .field("region", &self.region)
            .field("role_arn", &self.role_arn.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint_url", &self.endpoint_url)
            .field("session_name", &self.session_name)
            .field("external_id", &self.external_id)
            .finish()
    }
}

impl AwsBaseConfig {
    /// Create a new `AwsBaseConfig` with the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            role_arn: None,
            endpoint_url: None,
            session_name: None,
            external_id: None,
        }
    }
}

impl Default for AwsBaseConfig {
    fn default() -> Self {
        Self::new(default_region())
    }
}

fn default_region() -> String {
    "us-east-1".to_owned()
}

/// Configuration for the S3 object store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3StoreConfig {
    /// Shared AWS configuration (region, role ARN, endpoint URL).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// Destination bucket, also probed by the health check. When unset the
    /// health check lists buckets instead.
    #[serde(default)]
    pub bucket: Option<String>,

    /// Use path-style addressing (`http://host/bucket/key`). Required by
    /// `MinIO` and most S3-compatible services.
    #[serde(default)]
    pub force_path_style: bool,
}

impl S3StoreConfig {
    /// Create a new `S3StoreConfig` with the given AWS region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
            bucket: None,
            force_path_style: false,
        }
    }

    /// Set the bucket used for health checks.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Set the endpoint URL override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.aws.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Enable or disable path-style addressing.
    #[must_use]
    pub fn with_force_path_style(mut self, enabled: bool) -> Self {
        self.force_path_style = enabled;
        self
    }

    /// Set the IAM role ARN to assume.
    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.aws.role_arn = Some(role_arn.into());
        self
    }

    /// Set the STS session name for assume-role.
    #[must_use]
    pub fn with_session_name(mut self, session_name: impl Into<String>) -> Self {
        self.aws.session_name = Some(session_name.into());
        self
    }

    /// Set the external ID for cross-account trust policies.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.aws.external_id = Some(external_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_is_us_east_1() {
        let config = S3StoreConfig::default();
        assert_eq!(config.aws.region, "us-east-1");
        assert!(config.bucket.is_none());
        assert!(!config.force_path_style);
    }

    #[test]
    fn builder_chain() {
        let config = S3StoreConfig::new("eu-west-1")
            .with_bucket("documents")
            .with_endpoint_url("http://localhost:9000")
            .with_force_path_style(true)
            .with_role_arn("arn:aws:iam::123:role/ingest")
            .with_session_name("ingest-test")
            .with_external_id("ext-1");
        assert_eq!(config.bucket.as_deref(), Some("documents"));
        assert_eq!(
            config.aws.endpoint_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert!(config.force_path_style);
        assert_eq!(config.aws.session_name.as_deref(), Some("ingest-test"));
        assert_eq!(config.aws.external_id.as_deref(), Some("ext-1"));
    }

    #[test]
    fn debug_redacts_role_arn() {
        let config = S3StoreConfig::new("us-east-1").with_role_arn("arn:aws:iam::123456789012:role/x");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("123456789012"));
    }

    #[test]
    fn deserializes_flat_json() {
        let json = serde_json::json!({
            "region": "sa-east-1",
            "endpoint_url": "http://minio:9000",
            "force_path_style": true
        });
        let config: S3StoreConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.aws.region, "sa-east-1");
        assert_eq!(config.aws.endpoint_url.as_deref(), Some("http://minio:9000"));
        assert!(config.force_path_style);
        assert!(config.bucket.is_none());
    }
}
