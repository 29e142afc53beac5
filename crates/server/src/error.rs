use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ingest_gateway::IngestError;
use thiserror::Error;

/// Errors that can occur when running the ingestion server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An ingestion failure surfaced through the API.
    #[error("ingestion error: {0}")]
    Ingest(#[from] IngestError),
}

impl ServerError {
    /// HTTP status and client-facing message for this error.
    ///
    /// Internal details stay in the logs; clients only see a fixed message
    /// per failing stage.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Ingest(e) => match e {
                IngestError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                IngestError::TooLarge { .. } => (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "File exceeds the upload size limit".to_owned(),
                ),
                IngestError::Io(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to open file".to_owned(),
                ),
                IngestError::Fetch(_) => (
                    StatusCode::BAD_GATEWAY,
                    "Failed to download document".to_owned(),
                ),
                IngestError::Storage(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to upload to object storage".to_owned(),
                ),
                IngestError::Encode(_) | IngestError::Publish(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to publish event".to_owned(),
                ),
                IngestError::Configuration(msg) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
                }
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest_publisher::PublishError;
    use ingest_storage::StorageError;

    fn status_of(err: IngestError) -> (StatusCode, String) {
        ServerError::from(err).status_and_message()
    }

    #[test]
    fn maps_each_stage_to_its_message() {
        assert_eq!(
            status_of(IngestError::Validation("File is required".into())),
            (StatusCode::BAD_REQUEST, "File is required".to_owned())
        );
        assert_eq!(
            status_of(IngestError::Io("reset".into())),
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to open file".to_owned()
            )
        );
        assert_eq!(
            status_of(IngestError::Storage(StorageError::Timeout)),
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to upload to object storage".to_owned()
            )
        );
        assert_eq!(
            status_of(IngestError::Publish(PublishError::Timeout)),
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to publish event".to_owned()
            )
        );
        assert_eq!(
            status_of(IngestError::Fetch("404".into())).0,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(IngestError::TooLarge { size: 2, limit: 1 }).0,
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let (_, message) =
            status_of(StorageError::Connection("10.0.0.5:443 refused".into()).into());
        assert!(!message.contains("10.0.0.5"));
    }
}
