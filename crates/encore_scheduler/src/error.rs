// --- File: crates/encore_scheduler/src/error.rs ---
use encore_common::{external_service_error, EncoreError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Unknown meeting type: {0}")]
    UnknownMeetingType(String),
    #[error("Event type request failed: {0}")]
    EventTypeRequest(String),
    #[error("Event type provider error: {0}")]
    EventTypeProvider(String),
}

impl From<SchedulerError> for EncoreError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::UnknownMeetingType(id) => EncoreError::NotFoundError(id),
            SchedulerError::EventTypeRequest(msg) => EncoreError::HttpError(msg),
            SchedulerError::EventTypeProvider(_) => external_service_error("Event types", err),
        }
    }
}

/// The external script could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load script {src}: {reason}")]
pub struct ScriptError {
    pub src: String,
    pub reason: String,
}

impl ScriptError {
    pub fn new(src: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            reason: reason.into(),
        }
    }
}

/// The external library refused to render into the container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Widget initialization failed: {0}")]
pub struct WidgetError(pub String);
