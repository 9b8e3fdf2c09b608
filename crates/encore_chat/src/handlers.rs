// --- File: crates/encore_chat/src/handlers.rs ---
use crate::logic::{validate_message, ChatError, CompletionClient};
use crate::models::{ChatErrorResponse, ChatRequest, ChatResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use encore_common::log_error;
use encore_config::AppConfig;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct ChatState {
    pub config: Arc<AppConfig>,
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match &self {
            ChatError::Disabled => StatusCode::SERVICE_UNAVAILABLE,
            ChatError::TooShort | ChatError::TooLong => StatusCode::BAD_REQUEST,
            ChatError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ChatError::Upstream(_) | ChatError::Transport(_) => StatusCode::BAD_GATEWAY,
        };
        let body = ChatErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Forward a visitor message to the assistant model.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/chat",
    request_body(content = ChatRequest, example = json!({"message": "Do you play private events?"})),
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Message too short or too long", body = ChatErrorResponse),
        (status = 500, description = "Chat API key missing", body = ChatErrorResponse),
        (status = 502, description = "Completion API failed", body = ChatErrorResponse)
    ),
    tag = "Chat"
))]
pub async fn chat_handler(
    State(state): State<Arc<ChatState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatError> {
    if !state.config.use_chat {
        return Err(ChatError::Disabled);
    }

    let message = validate_message(&payload.message)?;

    let chat_config = state.config.chat.as_ref().ok_or_else(|| {
        error!("Chat configuration missing in AppConfig.");
        ChatError::MissingApiKey
    })?;
    let client = CompletionClient::from_config(chat_config)?;

    let response = client
        .complete(&message)
        .await
        .inspect_err(|e| log_error(e, "Chat completion failed"))?;

    info!("Chat reply sent ({} chars)", response.chars().count());
    Ok(Json(ChatResponse { response }))
}
