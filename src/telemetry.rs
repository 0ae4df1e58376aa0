//! Metric names and the Prometheus recorder backing `/metrics`.

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Inbound webhook requests, labelled by response `status` code.
pub const WEBHOOK_REQUESTS_TOTAL: &str = "telegram_webhook_requests_total";
/// Inbound webhook requests that ended in a 4xx/5xx.
pub const WEBHOOK_ERRORS_TOTAL: &str = "telegram_webhook_errors_total";
/// Time spent handling a successful webhook request.
pub const WEBHOOK_REQUEST_DURATION_SECONDS: &str = "telegram_webhook_request_duration_seconds";
/// Final delivery result per message, labelled `status=success|error`.
pub const MESSAGES_SENT_TOTAL: &str = "telegram_messages_sent_total";
/// Individual network attempts, labelled `outcome=success|error`.
pub const DELIVERY_ATTEMPTS_TOTAL: &str = "telegram_delivery_attempts_total";
/// Messages rejected by the rate limiter.
pub const RATE_LIMITED_TOTAL: &str = "telegram_rate_limited_total";

const REQUEST_DURATION_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 2.0, 5.0, 10.0];

fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full(WEBHOOK_REQUEST_DURATION_SECONDS.to_string()),
        REQUEST_DURATION_BUCKETS,
    )
}

/// Installs the global Prometheus recorder and returns a handle for rendering.
///
/// Can only succeed once per process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = builder()?.install_recorder()?;
    describe_metrics();
    Ok(handle)
}

/// Builds a handle that is not installed globally. Metrics recorded through
/// the `metrics` macros do not reach it.
pub fn detached_handle() -> Result<PrometheusHandle, BuildError> {
    Ok(builder()?.build_recorder().handle())
}

fn describe_metrics() {
    metrics::describe_counter!(WEBHOOK_REQUESTS_TOTAL, "Total number of webhook requests");
    metrics::describe_counter!(WEBHOOK_ERRORS_TOTAL, "Total number of webhook errors");
    metrics::describe_histogram!(
        WEBHOOK_REQUEST_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "Webhook request duration"
    );
    metrics::describe_counter!(MESSAGES_SENT_TOTAL, "Total number of messages sent to Telegram");
    metrics::describe_counter!(DELIVERY_ATTEMPTS_TOTAL, "Total number of delivery attempts");
    metrics::describe_counter!(RATE_LIMITED_TOTAL, "Messages dropped by the rate limiter");
}
