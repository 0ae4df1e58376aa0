//! The `/webhook` endpoint receiving Alertmanager batches.

use axum::{
    body::Bytes,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tokio::time::Instant;

use super::{ApiError, ApiState};
use crate::{models::NotificationBatch, telemetry};

/// Accepts a notification batch and relays it to the destination.
///
/// Responds once every message of the batch has been attempted. The response
/// only says whether the batch was accepted; per-message delivery results are
/// visible through metrics.
pub async fn webhook(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let started = Instant::now();
    let batch = NotificationBatch::from_slice(&body)?;

    if batch.alerts.is_empty() {
        tracing::debug!(group_key = %batch.group_key, "Received batch without alerts.");
        return Ok(Json(json!({ "status": "success" })));
    }

    state.relay.dispatch(batch).await?;

    metrics::histogram!(telemetry::WEBHOOK_REQUEST_DURATION_SECONDS)
        .record(started.elapsed().as_secs_f64());

    Ok(Json(json!({ "status": "success" })))
}

/// Counts webhook requests by response status.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    metrics::counter!(telemetry::WEBHOOK_REQUESTS_TOTAL, "status" => status.as_u16().to_string())
        .increment(1);
    if status.is_client_error() || status.is_server_error() {
        metrics::counter!(telemetry::WEBHOOK_ERRORS_TOTAL).increment(1);
    }

    response
}
