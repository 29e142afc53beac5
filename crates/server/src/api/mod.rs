pub mod health;
pub mod ingestion;
pub mod openapi;
pub mod schemas;
pub mod trace_context;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ingest_gateway::{DocumentFetcher, IngestionGateway};

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The ingestion pipeline.
    pub gateway: Arc<IngestionGateway>,
    /// HTTP client for URL ingestion.
    pub fetcher: DocumentFetcher,
    /// Largest accepted request body in bytes.
    pub max_upload_bytes: usize,
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/api/ingestion", post(ingestion::upload_document))
        .route("/api/ingestion/url", post(ingestion::ingest_from_url))
        .route("/actuator/health", get(health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(body_limit)
        .with_state(state)
        .layer(middleware::from_fn(trace_context::propagate_trace_context))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
