// --- File: crates/encore_chat/src/logic.rs ---
use crate::models::{CompletionMessage, CompletionRequest, CompletionResponse};
use encore_common::{
    config_error, external_service_error, validation_error, EncoreError, HTTP_CLIENT,
};
use encore_config::ChatConfig;
use thiserror::Error;
use tracing::{debug, error};

pub const MIN_MESSAGE_CHARS: usize = 2;
pub const MAX_MESSAGE_CHARS: usize = 500;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Chat service is disabled")]
    Disabled,
    #[error("Message is too short")]
    TooShort,
    #[error("Message is too long (max {} characters)", MAX_MESSAGE_CHARS)]
    TooLong,
    #[error("Chat API key is not configured")]
    MissingApiKey,
    #[error("Chat API error: {0}")]
    Upstream(String),
    #[error("Chat request failed: {0}")]
    Transport(String),
}

impl From<ChatError> for EncoreError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Disabled | ChatError::MissingApiKey => config_error(err),
            ChatError::TooShort | ChatError::TooLong => validation_error(err),
            ChatError::Upstream(_) => external_service_error("Chat API", err),
            ChatError::Transport(msg) => EncoreError::HttpError(msg),
        }
    }
}

/// Server-side check: the trimmed message must hold 2 to 500 characters.
pub fn validate_message(message: &str) -> Result<String, ChatError> {
    let trimmed = message.trim();
    let length = trimmed.chars().count();
    if length < MIN_MESSAGE_CHARS {
        return Err(ChatError::TooShort);
    }
    if length > MAX_MESSAGE_CHARS {
        return Err(ChatError::TooLong);
    }
    Ok(trimmed.to_string())
}

/// Client-side preparation: trim, cut to 500 characters, then require at
/// least two. Nothing is sent for a rejected message.
pub fn prepare_message(input: &str) -> Result<String, ChatError> {
    let truncated: String = input.trim().chars().take(MAX_MESSAGE_CHARS).collect();
    if truncated.chars().count() < MIN_MESSAGE_CHARS {
        return Err(ChatError::TooShort);
    }
    Ok(truncated)
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    system_prompt: String,
    max_tokens: Option<u32>,
}

impl CompletionClient {
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        Self::with_http(HTTP_CLIENT.clone(), config)
    }

    pub fn with_http(http: reqwest::Client, config: &ChatConfig) -> Result<Self, ChatError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ChatError::MissingApiKey)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Ask the model for a reply to one visitor message.
    pub async fn complete(&self, message: &str) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                CompletionMessage {
                    role: "user",
                    content: message,
                },
            ],
            max_tokens: self.max_tokens,
        };
        debug!("Sending chat completion request to {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            error!("Chat API returned {}: {}", status, details);
            return Err(ChatError::Upstream(format!("status {}", status.as_u16())));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Upstream(format!("invalid response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ChatError::Upstream("empty completion".to_string()))
    }
}
