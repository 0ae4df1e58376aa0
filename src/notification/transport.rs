//! The network leg of a delivery: one attempt to hand a message to the
//! destination.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::TransportError;
use crate::models::OutboundMessage;

/// A channel capable of sending one message per call. Retries, timeouts and
/// rate limiting are handled by the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Makes a single delivery attempt.
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError>;
}

/// Body of a Bot API `sendMessage` call.
#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_notification: bool,
}

/// The subset of the Bot API response envelope we inspect.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramTransport {
    client: Client,
    url: String,
    chat_id: String,
    parse_mode: String,
}

impl TelegramTransport {
    /// Creates a transport posting to `url` (the bot's `sendMessage` endpoint).
    pub fn new(
        client: Client,
        url: impl Into<String>,
        chat_id: impl Into<String>,
        parse_mode: impl Into<String>,
    ) -> Self {
        Self { client, url: url.into(), chat_id: chat_id.into(), parse_mode: parse_mode.into() }
    }
}

#[async_trait]
impl MessageTransport for TelegramTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        let payload = SendMessagePayload {
            chat_id: &self.chat_id,
            text: &message.text,
            parse_mode: &self.parse_mode,
            disable_notification: message.silent,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        // Bodies that are not a Bot API envelope (e.g. proxies) count as accepted.
        let body = response.bytes().await?;
        if let Ok(reply) = serde_json::from_slice::<BotApiResponse>(&body) {
            if !reply.ok {
                return Err(TransportError::Rejected(
                    reply.description.unwrap_or_else(|| "no description".to_string()),
                ));
            }
        }

        Ok(())
    }
}
