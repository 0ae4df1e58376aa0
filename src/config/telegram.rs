use serde::Deserialize;
use url::Url;

use super::{DeliveryRetryConfig, env_or, secret_from_env};

fn default_bot_token() -> Option<String> {
    secret_from_env("TELEGRAM_BOT_TOKEN", "TELEGRAM_BOT_TOKEN_FILE")
}

fn default_chat_id() -> Option<String> {
    secret_from_env("TELEGRAM_CHAT_ID", "TELEGRAM_CHAT_ID_FILE")
}

fn default_api_base_url() -> Url {
    Url::parse("https://api.telegram.org").expect("static URL is valid")
}

fn default_parse_mode() -> String {
    "HTML".to_string()
}

fn default_rate_limit_per_minute() -> u32 {
    env_or("RATE_LIMIT_PER_MINUTE", 20)
}

/// Configuration of the Telegram destination.
#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    /// Bot API token. Falls back to `TELEGRAM_BOT_TOKEN` or
    /// `TELEGRAM_BOT_TOKEN_FILE`.
    #[serde(default = "default_bot_token")]
    pub bot_token: Option<String>,

    /// Target chat. Falls back to `TELEGRAM_CHAT_ID` or `TELEGRAM_CHAT_ID_FILE`.
    #[serde(default = "default_chat_id")]
    pub chat_id: Option<String>,

    /// Base URL of the Bot API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: Url,

    /// Telegram `parse_mode` the formatter output is written for.
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,

    /// Maximum number of messages admitted per trailing 60 seconds.
    #[serde(default = "default_rate_limit_per_minute")]
    pub rate_limit_per_minute: u32,

    /// Retry policy for failed deliveries.
    #[serde(default)]
    pub retry: DeliveryRetryConfig,
}

impl TelegramConfig {
    /// Returns `(bot_token, chat_id)` when both are configured and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.bot_token.as_deref().filter(|t| !t.is_empty())?;
        let chat_id = self.chat_id.as_deref().filter(|c| !c.is_empty())?;
        Some((token, chat_id))
    }

    /// The `sendMessage` endpoint for the given bot token.
    pub fn send_message_url(&self, token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base_url.as_str().trim_end_matches('/'), token)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: default_bot_token(),
            chat_id: default_chat_id(),
            api_base_url: default_api_base_url(),
            parse_mode: default_parse_mode(),
            rate_limit_per_minute: default_rate_limit_per_minute(),
            retry: DeliveryRetryConfig::default(),
        }
    }
}
