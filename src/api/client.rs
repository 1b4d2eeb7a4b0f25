//! reqwest implementation of the dialogue exchanges

use super::{ApiError, ChatResponse, ReplyRequest};
use crate::runtime::DialogueClient;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

const START_PATH: &str = "/api/chat/start";
const REPLY_PATH: &str = "/api/chat/reply";

/// Default dialogue service location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the dialogue service
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Dialogue client over HTTP
pub struct HttpDialogueClient {
    client: Client,
    base_url: String,
}

impl HttpDialogueClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_response(response: reqwest::Response) -> Result<ChatResponse, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::decode(format!("Failed to parse response: {e} - body: {body}")))
    }
}

#[async_trait]
impl DialogueClient for HttpDialogueClient {
    async fn start(&self) -> Result<ChatResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}{START_PATH}", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        Self::read_response(response).await
    }

    async fn reply(&self, request: &ReplyRequest) -> Result<ChatResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}{REPLY_PATH}", self.base_url))
            .json(request)
            .send()
            .await?;

        let chat = Self::read_response(response).await?;
        if chat.session_id != request.session_id {
            return Err(ApiError::protocol(format!(
                "Reply for session {} answered by session {}",
                request.session_id, chat.session_id
            )));
        }
        Ok(chat)
    }
}
