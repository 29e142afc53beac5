use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "UP")]
    pub status: String,
    /// Implementation runtime.
    #[schema(example = "rust")]
    pub runtime: String,
    /// Current ingestion counters.
    pub metrics: MetricsResponse,
}

/// Ingestion pipeline counters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    /// Requests that reached the ingestion endpoints.
    #[schema(example = 120)]
    pub received: u64,
    /// Documents stored and announced.
    #[schema(example = 112)]
    pub accepted: u64,
    /// Requests rejected before storage.
    #[schema(example = 4)]
    pub rejected: u64,
    /// Object storage write failures.
    #[schema(example = 3)]
    pub storage_failures: u64,
    /// Event publish failures.
    #[schema(example = 1)]
    pub publish_failures: u64,
    /// Total bytes of accepted documents.
    #[schema(example = 58_720_256)]
    pub bytes_ingested: u64,
}

impl From<ingest_gateway::MetricsSnapshot> for MetricsResponse {
    fn from(snap: ingest_gateway::MetricsSnapshot) -> Self {
        Self {
            received: snap.received,
            accepted: snap.accepted,
            rejected: snap.rejected,
            storage_failures: snap.storage_failures,
            publish_failures: snap.publish_failures,
            bytes_ingested: snap.bytes_ingested,
        }
    }
}

/// Body of `POST /api/ingestion/url`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UrlIngestionRequest {
    /// Human-readable document title. Also the base of the stored file name.
    #[serde(default)]
    #[schema(example = "Attention Is All You Need")]
    pub title: String,
    /// Location of the PDF to download.
    #[serde(default)]
    #[schema(example = "https://arxiv.org/pdf/1706.03762")]
    pub pdf_url: String,
}

/// Multipart form accepted by `POST /api/ingestion`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// The document to ingest.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Standard error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    #[schema(example = "File is required")]
    pub error: String,
}
