//! W3C Trace Context propagation middleware.
//!
//! Links the server span of an ingestion request to the caller's trace when
//! a `traceparent` header is present.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use opentelemetry::propagation::Extractor;
use opentelemetry::{global, trace::TraceContextExt};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Carrier that reads from HTTP header maps.
struct HeaderExtractor<'a>(&'a axum::http::HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(axum::http::HeaderName::as_str).collect()
    }
}

/// Make a remote `traceparent` the parent of the current span.
pub async fn propagate_trace_context(request: Request, next: Next) -> Response {
    let parent_cx = global::get_text_map_propagator(|p| {
        p.extract(&HeaderExtractor(request.headers()))
    });

    if parent_cx.span().span_context().is_remote() {
        tracing::Span::current().set_parent(parent_cx);
    }

    next.run(request).await
}
