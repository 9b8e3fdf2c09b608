// --- File: crates/encore_chat/src/lib.rs ---
//! Site assistant.
//!
//! The server half (`routes`) forwards validated visitor messages to an
//! OpenAI-compatible completion API. The visitor half (`ChatSession`) keeps
//! the transcript and talks to the server through a [`ChatTransport`].
pub mod client;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;
pub mod session;

pub use client::{ChatProxyClient, ChatTransport};
pub use logic::{prepare_message, validate_message, ChatError, CompletionClient};
pub use models::{ChatMessage, ChatRequest, ChatResponse};
pub use routes::routes;
pub use session::{ChatSession, SendOutcome};
