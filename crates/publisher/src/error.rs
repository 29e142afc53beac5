use thiserror::Error;

/// Errors that can occur when publishing an event.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The broker rejected or failed to acknowledge the message.
    #[error("broker write failed: {0}")]
    Broker(String),

    /// No acknowledgement was received in time.
    #[error("publish timed out")]
    Timeout,

    /// The producer could not be created or is misconfigured.
    #[error("invalid publisher configuration: {0}")]
    Configuration(String),
}
