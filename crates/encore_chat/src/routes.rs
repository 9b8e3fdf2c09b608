// --- File: crates/encore_chat/src/routes.rs ---
use crate::handlers::{chat_handler, ChatState};
use axum::{routing::post, Router};
use encore_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the chat feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .with_state(Arc::new(ChatState { config }))
}
