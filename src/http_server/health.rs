//! Liveness and metrics endpoints.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;

/// Reports that the process is up.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "timestamp": Utc::now().to_rfc3339() }))
}

/// Renders all recorded metrics in the Prometheus text exposition format.
pub async fn metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], handle.render())
}
