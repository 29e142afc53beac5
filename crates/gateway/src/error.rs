use ingest_publisher::PublishError;
use ingest_storage::StorageError;
use thiserror::Error;

use crate::stage::IngestStage;

/// Errors that end an ingestion request.
///
/// Every variant except [`IngestError::Validation`] is a server-side failure.
/// None of them are retried.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The request is missing something the client must supply.
    #[error("validation error: {0}")]
    Validation(String),

    /// The upload body could not be read.
    #[error("io error: {0}")]
    Io(String),

    /// A remote document could not be downloaded.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The upload exceeds the configured size limit.
    #[error("document too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge {
        /// Bytes received before giving up.
        size: u64,
        /// Maximum allowed size.
        limit: u64,
    },

    /// Writing to object storage failed. No event was published.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The event could not be encoded.
    #[error("event encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Publishing failed. The stored object is left in place.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// The gateway was built without a required component.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl IngestError {
    /// Stage the request was in when this error occurred.
    pub fn stage(&self) -> IngestStage {
        match self {
            Self::Validation(_) | Self::Io(_) | Self::Fetch(_) | Self::TooLarge { .. } => {
                IngestStage::ReceivingFile
            }
            Self::Storage(_) => IngestStage::Uploading,
            Self::Encode(_) | Self::Publish(_) => IngestStage::Publishing,
            Self::Configuration(_) => IngestStage::Failed,
        }
    }

    /// Whether the client caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::TooLarge { .. })
    }
}
