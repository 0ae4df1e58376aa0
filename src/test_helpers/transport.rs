//! An in-memory `MessageTransport` with scripted results.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    models::OutboundMessage,
    notification::{MessageTransport, TransportError},
};

/// Records every attempt and answers from a script. Once the script runs out
/// every attempt succeeds.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<(), TransportError>>>,
    attempts: Mutex<Vec<OutboundMessage>>,
}

impl ScriptedTransport {
    /// A transport where every attempt succeeds.
    pub fn always_ok() -> Self {
        Self::default()
    }

    /// A transport answering with the given results in order.
    pub fn with_script(script: Vec<Result<(), TransportError>>) -> Self {
        Self { script: Mutex::new(script.into()), attempts: Mutex::default() }
    }

    /// A transport whose first `failures` attempts fail with a 503.
    pub fn failing_first(failures: usize) -> Self {
        Self::with_script(
            (0..failures).map(|_| Err(TransportError::Status(StatusCode::SERVICE_UNAVAILABLE))).collect(),
        )
    }

    /// Every message passed to `send`, one entry per attempt.
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.attempts.lock().unwrap().clone()
    }

    /// Number of attempts made.
    pub fn attempts(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageTransport for ScriptedTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        self.attempts.lock().unwrap().push(message.clone());
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}
