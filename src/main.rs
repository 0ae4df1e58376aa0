use std::{sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use herald::{
    config::AppConfig,
    http_client::create_http_client,
    http_server::{self, ApiState},
    notification::{DeliveryClient, RateLimiter},
    relay::AlertRelay,
    telemetry,
};
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the webhook relay server.
    Run {
        /// Directory holding an optional `app.yaml`.
        #[arg(long)]
        config_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config_dir } => run(config_dir.as_deref()).await?,
    }

    Ok(())
}

async fn run(config_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(config_dir)?;
    tracing::debug!(
        listen_address = %config.server.listen_address,
        rate_limit_per_minute = config.telegram.rate_limit_per_minute,
        max_retries = config.telegram.retry.max_retries,
        "Configuration loaded."
    );

    let metrics = telemetry::install_recorder()?;
    let upkeep_handle = metrics.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep_handle.run_upkeep();
        }
    });

    let http_client = create_http_client(&config.http_base_config)?;
    let rate_limiter = Arc::new(RateLimiter::new(config.telegram.rate_limit_per_minute));
    let delivery = DeliveryClient::from_config(
        &config.telegram,
        http_client,
        rate_limiter,
        config.http_base_config.request_timeout,
    );
    if delivery.is_configured() {
        tracing::info!("Telegram destination configured.");
    }
    let relay = AlertRelay::new(Arc::new(delivery));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, draining in-flight requests...");
        let _ = shutdown_tx.send(true);
    });

    http_server::run_server_from_config(&config.server, ApiState { relay, metrics }, shutdown_rx)
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C.");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
