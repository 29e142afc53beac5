use std::fmt;

/// Where an ingestion request is in its lifecycle.
///
/// Requests move strictly forward through
/// `ReceivingFile → Hashing → Uploading → Publishing → Responding`;
/// `Failed` can be entered from any of them and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestStage {
    /// Reading the multipart body or downloading the remote document.
    ReceivingFile,
    /// Computing the content digest.
    Hashing,
    /// Writing to object storage.
    Uploading,
    /// Publishing the ingestion event.
    Publishing,
    /// Success; the digest is returned to the client.
    Responding,
    /// The request ended with an error.
    Failed,
}

impl IngestStage {
    /// Lowercase label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReceivingFile => "receiving_file",
            Self::Hashing => "hashing",
            Self::Uploading => "uploading",
            Self::Publishing => "publishing",
            Self::Responding => "responding",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Responding | Self::Failed)
    }
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
