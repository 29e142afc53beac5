use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::schemas::HealthResponse;

/// `GET /actuator/health` -- liveness probe with a metrics snapshot.
///
/// Does not contact the object store or the broker.
#[utoipa::path(
    get,
    path = "/actuator/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and a snapshot of ingestion counters.",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let snap = state.gateway.metrics().snapshot();

    let body = HealthResponse {
        status: "UP".into(),
        runtime: "rust".into(),
        metrics: snap.into(),
    };

    (StatusCode::OK, Json(body))
}
