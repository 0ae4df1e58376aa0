//! Configuration module for Herald.

mod app_config;
mod delivery_retry;
mod helpers;
mod http_base;
mod server;
mod telegram;

pub use app_config::AppConfig;
pub use delivery_retry::DeliveryRetryConfig;
pub use helpers::{
    deserialize_duration_from_ms, deserialize_duration_from_seconds, env_or, secret_from_env,
    serialize_duration_to_ms, serialize_duration_to_seconds,
};
pub use http_base::BaseHttpClientConfig;
pub use server::ServerConfig;
pub use telegram::TelegramConfig;
