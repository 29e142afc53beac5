#![allow(clippy::needless_for_each)]

use ingest_core::IngestionEvent;

use super::schemas::{
    ErrorResponse, HealthResponse, MetricsResponse, UploadForm, UrlIngestionRequest,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Document Ingestion Gateway API",
        version = "0.1.0",
        description = "Accepts documents, stores them by content digest and announces them on the document.ingestion topic.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Ingestion", description = "Document upload and URL ingestion"),
        (name = "Health", description = "Service health and counters")
    ),
    paths(
        super::ingestion::upload_document,
        super::ingestion::ingest_from_url,
        super::health::health,
    ),
    components(schemas(
        ErrorResponse,
        HealthResponse,
        MetricsResponse,
        UploadForm,
        UrlIngestionRequest,
        IngestionEvent,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert!(paths.contains(&"/api/ingestion"));
        assert!(paths.contains(&"/api/ingestion/url"));
        assert!(paths.contains(&"/actuator/health"));
    }
}
