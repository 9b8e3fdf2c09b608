// --- File: crates/encore_chat/src/client.rs ---
use crate::logic::ChatError;
use crate::models::{ChatErrorResponse, ChatRequest, ChatResponse};
use async_trait::async_trait;
use encore_common::HTTP_CLIENT;

/// Sends one prepared message to the assistant and returns its reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, ChatError>;
}

/// Calls the backend's `/api/chat` endpoint.
#[derive(Debug, Clone)]
pub struct ChatProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatProxyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http(HTTP_CLIENT.clone(), endpoint)
    }

    pub fn with_http(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for ChatProxyClient {
    async fn send(&self, message: &str) -> Result<String, ChatError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<ChatErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("status {}", status.as_u16()));
            return Err(ChatError::Upstream(reason));
        }

        response
            .json::<ChatResponse>()
            .await
            .map(|body| body.response)
            .map_err(|e| ChatError::Upstream(format!("invalid response: {}", e)))
    }
}
