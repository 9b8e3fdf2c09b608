// --- File: crates/encore_chat/src/session.rs ---
//! The visitor-side chat widget state.

use crate::client::ChatTransport;
use crate::logic::{prepare_message, ChatError};
use crate::models::ChatMessage;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

pub const GREETING: &str = "Salut ! Je suis l'assistant de l'artiste. Comment puis-je vous aider aujourd'hui ?";
pub const APOLOGY: &str = "Désolé, je rencontre un problème technique. Veuillez réessayer.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The assistant answered; the bot message was appended.
    Replied(ChatMessage),
    /// Blank input, or a request was already in flight. Nothing changed.
    Ignored,
}

/// A chat transcript plus the single in-flight request it allows.
pub struct ChatSession<T: ChatTransport> {
    transport: T,
    transcript: Mutex<Vec<ChatMessage>>,
    in_flight: AtomicBool,
    next_id: AtomicU64,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self::with_greeting(transport, GREETING)
    }

    pub fn with_greeting(transport: T, greeting: impl Into<String>) -> Self {
        let session = Self {
            transport,
            transcript: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
        };
        session.push(greeting.into(), true);
        session
    }

    fn push(&self, text: String, is_bot: bool) -> ChatMessage {
        let message = ChatMessage {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            text,
            is_bot,
            timestamp: Utc::now(),
        };
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        message
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Send visitor input.
    ///
    /// The user message is appended before the request goes out. On failure
    /// an apology is appended and the error is returned to the caller.
    pub async fn send(&self, input: &str) -> Result<SendOutcome, ChatError> {
        if input.trim().is_empty() {
            return Ok(SendOutcome::Ignored);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Chat request already in flight; ignoring input");
            return Ok(SendOutcome::Ignored);
        }
        let _guard = InFlight(&self.in_flight);

        let message = prepare_message(input)?;
        self.push(message.clone(), false);

        match self.transport.send(&message).await {
            Ok(reply) => Ok(SendOutcome::Replied(self.push(reply, true))),
            Err(err) => {
                warn!("Chat request failed: {}", err);
                self.push(APOLOGY.to_string(), true);
                Err(err)
            }
        }
    }
}
