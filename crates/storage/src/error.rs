use thiserror::Error;

/// Errors that can occur while writing to or reading from object storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The bytes could not be sent to the backend.
    #[error("object write failed: {0}")]
    Write(String),

    /// The backend received the write but did not commit the object.
    ///
    /// The object may be partially written or absent; it must not be
    /// reported as stored.
    #[error("object commit failed: {0}")]
    Commit(String),

    /// The request was throttled by the backend.
    #[error("storage request throttled")]
    Throttled,

    /// A network or connection error occurred.
    #[error("storage connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("storage request timed out")]
    Timeout,

    /// Configuration or credentials are invalid.
    #[error("invalid storage configuration: {0}")]
    Configuration(String),
}

/// Classify an SDK error string into the appropriate [`StorageError`].
///
/// Inspects the message for throttling, timeout and connection patterns. A
/// service-side rejection of a write means the object was never committed,
/// so anything unrecognised maps to [`StorageError::Commit`].
pub fn classify_sdk_error(error_str: &str) -> StorageError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl")
        || lower.contains("slowdown")
        || lower.contains("slow down")
        || lower.contains("rate exceed")
        || lower.contains("too many")
    {
        StorageError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        StorageError::Timeout
    } else if lower.contains("dispatch failure")
        || lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        StorageError::Connection(error_str.to_owned())
    } else if lower.contains("credential") || lower.contains("access denied") {
        StorageError::Configuration(error_str.to_owned())
    } else {
        StorageError::Commit(error_str.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_throttled() {
        let err = classify_sdk_error("SlowDown: Please reduce your request rate");
        assert!(matches!(err, StorageError::Throttled));
    }

    #[test]
    fn classify_rate_exceeded() {
        let err = classify_sdk_error("Rate exceeded for operation PutObject");
        assert!(matches!(err, StorageError::Throttled));
    }

    #[test]
    fn classify_throttling_code_in_service_error() {
        let err = classify_sdk_error(
            "service error: unhandled error (SlowDown): Please reduce your request rate.",
        );
        assert!(matches!(err, StorageError::Throttled));
    }

    #[test]
    fn classify_timeout() {
        let err = classify_sdk_error("Request timed out after 30s");
        assert!(matches!(err, StorageError::Timeout));
    }

    #[test]
    fn classify_connection() {
        let err = classify_sdk_error("dispatch failure: Connection refused: localhost:9000");
        assert!(matches!(err, StorageError::Connection(_)));
    }

    #[test]
    fn classify_credentials() {
        let err = classify_sdk_error("AccessDenied: Access Denied");
        assert!(matches!(err, StorageError::Configuration(_)));
    }

    #[test]
    fn classify_generic_service_error_as_commit_failure() {
        let err = classify_sdk_error("NoSuchBucket: The specified bucket does not exist");
        assert!(matches!(err, StorageError::Commit(_)));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            StorageError::Timeout.to_string(),
            "storage request timed out"
        );
        assert_eq!(
            StorageError::Commit("bad".into()).to_string(),
            "object commit failed: bad"
        );
        assert_eq!(
            StorageError::Write("reset".into()).to_string(),
            "object write failed: reset"
        );
    }
}
