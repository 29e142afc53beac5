use ingest_storage::S3StoreConfig;
use serde::Deserialize;

/// Object storage configuration.
///
/// # Example
///
/// ```toml
/// [storage]
/// backend = "s3"
/// bucket = "documents"
/// region = "us-east-1"
/// endpoint_url = "http://localhost:9000"
/// force_path_style = true
/// ```
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Backend type: `"s3"` or `"memory"`.
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// S3 connection settings, including the destination bucket.
    #[serde(flatten)]
    pub s3: S3StoreConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            s3: S3StoreConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Destination bucket, if one is configured and non-blank.
    pub fn bucket(&self) -> Option<&str> {
        self.s3
            .bucket
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}

fn default_storage_backend() -> String {
    "s3".to_owned()
}
