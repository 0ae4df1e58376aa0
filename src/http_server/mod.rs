//! HTTP server module

mod error;
mod health;
mod webhook;

use std::{future::Future, net::SocketAddr};

use axum::{
    Router,
    extract::FromRef,
    http::Method,
    middleware,
    routing::{get, post},
};
pub use error::ApiError;
use metrics_exporter_prometheus::PrometheusHandle;
use thiserror::Error;
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, relay::AlertRelay, telemetry};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct ApiState {
    /// Relay that turns batches into delivered messages.
    pub relay: AlertRelay,
    /// Handle used to render `/metrics`.
    pub metrics: PrometheusHandle,
}

impl FromRef<ApiState> for PrometheusHandle {
    fn from_ref(state: &ApiState) -> Self {
        state.metrics.clone()
    }
}

/// Errors raised while starting or running the HTTP listeners.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configured listen address is not a valid socket address.
    #[error("Invalid listen address '{address}': {source}")]
    InvalidAddress {
        /// The offending address.
        address: String,
        /// The underlying parse error.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Binding the listener failed.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        /// The address that could not be bound.
        address: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Server failed: {0}")]
    Serve(#[source] std::io::Error),
}

/// POSTs to unmapped paths are counted as webhook requests, other methods are not.
async fn not_found(method: Method) -> ApiError {
    if method == Method::POST {
        metrics::counter!(telemetry::WEBHOOK_REQUESTS_TOTAL, "status" => "404").increment(1);
    }
    ApiError::NotFound
}

/// Builds the application router: `/webhook`, `/health` and `/metrics`.
pub fn router(state: ApiState) -> Router {
    let webhook_routes = Router::new()
        .route("/webhook", post(webhook::webhook))
        .route_layer(middleware::from_fn(webhook::track_requests));

    Router::new()
        .merge(webhook_routes)
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds a router that serves only `/metrics`, for a dedicated listener.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(health::metrics))
        .fallback(not_found)
        .with_state(handle)
}

/// Binds a TCP listener on `address`.
pub async fn bind(address: &str) -> Result<TcpListener, ServerError> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|source| ServerError::InvalidAddress { address: address.to_string(), source })?;
    TcpListener::bind(addr).await.map_err(|source| ServerError::Bind { address: addr, source })
}

/// Serves `app` on `listener` until `shutdown` resolves. In-flight requests
/// are allowed to finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    // A dropped sender also means shut down.
    let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Runs the HTTP server, plus the dedicated metrics listener when one is
/// configured, until `shutdown` flips to `true`.
pub async fn run_server_from_config(
    config: &ServerConfig,
    state: ApiState,
    shutdown: watch::Receiver<bool>,
) -> Result<(), ServerError> {
    let listener = bind(&config.listen_address).await?;

    let metrics_task = match &config.metrics_listen_address {
        Some(address) => {
            let metrics_listener = bind(address).await?;
            tracing::info!(address = %address, "Metrics server listening.");
            let app = metrics_router(state.metrics.clone());
            let shutdown = wait_for_shutdown(shutdown.clone());
            Some(tokio::spawn(serve(metrics_listener, app, shutdown)))
        }
        None => None,
    };

    tracing::info!(address = %config.listen_address, "Webhook server listening.");
    serve(listener, router(state), wait_for_shutdown(shutdown)).await?;

    if let Some(task) = metrics_task {
        match task.await {
            Ok(result) => result?,
            Err(e) => tracing::error!(error = %e, "Metrics server task failed."),
        }
    }

    tracing::info!("HTTP server stopped.");
    Ok(())
}
