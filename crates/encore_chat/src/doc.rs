// --- File: crates/encore_chat/src/doc.rs ---
#![cfg(feature = "openapi")]

use utoipa::OpenApi;

use crate::models::{ChatErrorResponse, ChatRequest, ChatResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::chat_handler),
    components(schemas(ChatRequest, ChatResponse, ChatErrorResponse)),
    tags(
        (name = "Chat", description = "Site assistant")
    )
)]
pub struct ChatApiDoc;
