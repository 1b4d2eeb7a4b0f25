//! Client for the remote dialogue service
//!
//! Two JSON-over-HTTP exchanges: start a session, and reply within one.

mod client;
mod error;
mod types;

pub use client::{ApiConfig, HttpDialogueClient};
pub use error::{ApiError, ApiErrorKind};
pub use types::{ChatResponse, ReplyRequest};

use crate::runtime::DialogueClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Logging wrapper for dialogue clients
pub struct LoggingClient {
    inner: Arc<dyn DialogueClient>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn DialogueClient>) -> Self {
        Self { inner }
    }

    fn log_outcome(exchange: &str, duration: std::time::Duration, result: &Result<ChatResponse, ApiError>) {
        match result {
            Ok(response) => {
                tracing::info!(
                    exchange,
                    session_id = %response.session_id,
                    phase = %response.phase,
                    is_complete = response.is_complete,
                    has_message = response.assistant_message.is_some(),
                    duration_ms = %duration.as_millis(),
                    "Dialogue exchange completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    exchange,
                    kind = ?e.kind,
                    error = %e.message,
                    duration_ms = %duration.as_millis(),
                    "Dialogue exchange failed"
                );
            }
        }
    }
}

#[async_trait]
impl DialogueClient for LoggingClient {
    async fn start(&self) -> Result<ChatResponse, ApiError> {
        let start = std::time::Instant::now();
        let result = self.inner.start().await;
        Self::log_outcome("start", start.elapsed(), &result);
        result
    }

    async fn reply(&self, request: &ReplyRequest) -> Result<ChatResponse, ApiError> {
        let start = std::time::Instant::now();
        let result = self.inner.reply(request).await;
        Self::log_outcome("reply", start.elapsed(), &result);
        result
    }
}
