use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, error, info, instrument};

use crate::auth::build_sdk_config;
use crate::config::S3StoreConfig;
use crate::error::{StorageError, classify_sdk_error};
use crate::store::ObjectStore;
use crate::types::{PutObject, StoredObject};

/// S3 (or S3-compatible) object store.
///
/// `PutObject` is a single request that both transfers and commits the
/// object, so a successful response is the commit point. Any SDK error on
/// that request leaves the object uncommitted.
pub struct S3ObjectStore {
    config: S3StoreConfig,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3ObjectStore {
    /// Create a new `S3ObjectStore` by building an AWS SDK client.
    pub async fn new(config: S3StoreConfig) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();
        let client = aws_sdk_s3::Client::from_conf(s3_config);
        Self { config, client }
    }

    /// Create an `S3ObjectStore` with a pre-built client.
    pub fn with_client(config: S3StoreConfig, client: aws_sdk_s3::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "s3"
    }

    #[instrument(skip(self, object), fields(bucket = %object.bucket, key = %object.key, size = object.data.len()))]
    async fn put(&self, object: PutObject) -> Result<StoredObject, StorageError> {
        let stored = StoredObject::committed(&object);

        debug!("uploading object to S3");

        self.client
            .put_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .content_type(&object.content_type)
            .content_length(i64::try_from(object.data.len()).unwrap_or(i64::MAX))
            .body(ByteStream::from(object.data))
            .send()
            .await
            .map_err(|e| {
                let err_str = aws_sdk_s3::error::DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "S3 put_object failed");
                classify_sdk_error(&err_str)
            })?;

        info!("S3 object committed");
        Ok(stored)
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, StorageError> {
        let result = self.client.get_object().bucket(bucket).key(key).send().await;

        let output = match result {
            Ok(output) => output,
            Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
                return Ok(None);
            }
            Err(e) => {
                let err_str = aws_sdk_s3::error::DisplayErrorContext(&e).to_string();
                error!(error = %err_str, bucket = %bucket, key = %key, "S3 get_object failed");
                return Err(classify_sdk_error(&err_str));
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Connection(format!("failed to read S3 body: {e}")))?
            .into_bytes();

        Ok(Some(body))
    }

    #[instrument(skip(self), fields(backend = "s3"))]
    async fn health_check(&self) -> Result<(), StorageError> {
        let result = match &self.config.bucket {
            Some(bucket) => self
                .client
                .head_bucket()
                .bucket(bucket)
                .send()
                .await
                .map(|_| ())
                .map_err(|e| aws_sdk_s3::error::DisplayErrorContext(&e).to_string()),
            None => self
                .client
                .list_buckets()
                .max_buckets(1)
                .send()
                .await
                .map(|_| ())
                .map_err(|e| aws_sdk_s3::error::DisplayErrorContext(&e).to_string()),
        };

        result.map_err(|err_str| {
            error!(error = %err_str, "S3 health check failed");
            StorageError::Connection(format!("S3 health check failed: {err_str}"))
        })
    }
}
