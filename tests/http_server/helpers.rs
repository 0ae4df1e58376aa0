use std::{
    net::SocketAddr,
    sync::{Arc, OnceLock},
    time::Duration,
};

use herald::{
    config::{DeliveryRetryConfig, TelegramConfig},
    http_server::{self, ApiState, ServerError},
    notification::{DeliveryClient, RateLimiter},
    relay::AlertRelay,
    telemetry,
};
use metrics_exporter_prometheus::PrometheusHandle;
use reqwest::Client;
use tokio::{sync::watch, task};
use url::Url;

pub const BOT_TOKEN: &str = "123456:test-token";
pub const CHAT_ID: &str = "-1001";

/// The recorder can only be installed once per process.
pub fn metrics_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE.get_or_init(|| telemetry::install_recorder().expect("Failed to install recorder")).clone()
}

/// Telegram config pointing at a mock Bot API with millisecond backoff.
pub fn telegram_config(api_base_url: &str, rate_limit_per_minute: u32) -> TelegramConfig {
    TelegramConfig {
        bot_token: Some(BOT_TOKEN.to_string()),
        chat_id: Some(CHAT_ID.to_string()),
        api_base_url: Url::parse(api_base_url).expect("Invalid mock URL"),
        parse_mode: "HTML".to_string(),
        rate_limit_per_minute,
        retry: DeliveryRetryConfig {
            max_retries: 3,
            base_for_backoff: 2,
            initial_backoff_ms: Duration::from_millis(5),
        },
    }
}

pub fn send_message_path() -> String {
    format!("/bot{BOT_TOKEN}/sendMessage")
}

pub struct TestServer {
    pub address: SocketAddr,
    pub server_handle: task::JoinHandle<Result<(), ServerError>>,
    pub client: Client,
    shutdown_tx: watch::Sender<bool>,
}

impl TestServer {
    pub async fn new(telegram: TelegramConfig) -> Self {
        let listener = http_server::bind("127.0.0.1:0").await.expect("Failed to bind");
        let address = listener.local_addr().expect("Failed to get address");

        let delivery = DeliveryClient::from_config(
            &telegram,
            Client::builder().no_proxy().build().expect("Failed to build client"),
            Arc::new(RateLimiter::new(telegram.rate_limit_per_minute)),
            Duration::from_secs(5),
        );
        let state =
            ApiState { relay: AlertRelay::new(Arc::new(delivery)), metrics: metrics_handle() };

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let server_handle = task::spawn(http_server::serve(
            listener,
            http_server::router(state),
            async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            },
        ));

        let client = Client::builder().no_proxy().build().expect("Failed to build client");
        Self { address, server_handle, client, shutdown_tx }
    }

    /// A server whose Telegram credentials are missing.
    pub async fn unconfigured() -> Self {
        let mut telegram = telegram_config("http://127.0.0.1:9", 20);
        telegram.bot_token = None;
        Self::new(telegram).await
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        let url = format!("http://{}{}", self.address, path);
        self.client.get(&url).send().await.expect("Request failed")
    }

    pub async fn post_webhook(&self, body: impl Into<reqwest::Body>) -> reqwest::Response {
        let url = format!("http://{}/webhook", self.address);
        self.client
            .post(&url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        self.server_handle.await.expect("Server task panicked").expect("Server failed");
    }
}
